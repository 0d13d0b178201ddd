//! Reader and writer for the bench netlist text format.
//!
//! ```text
//! # comment
//! INPUT(a)
//! OUTPUT(y)
//! y = NAND(a, b)
//! ```
//!
//! One statement per line; blank lines and `#` comments are ignored anywhere.
//! Gate lines are kept in file order, which is trusted to be topological.

use std::io::{self, Write};

use tracing::debug;

use crate::errors::FormatError;
use crate::{Gate, GateType, Netlist};

/// Characters that can never appear inside a signal name.
const RESERVED: [char; 4] = ['=', '(', ')', ','];

/// Width of the output-name column in written gate lines.
const NAME_COLUMN: usize = 10;

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c))
}

fn check_name(name: &str, line: usize) -> Result<&str, FormatError> {
    if !is_valid_name(name) {
        return Err(FormatError::InvalidName {
            line,
            name: name.to_owned(),
        });
    }
    Ok(name)
}

/// Strips a declaration keyword, as long as it's directly followed by the
/// opening parenthesis (so a gate named `INPUT1` is still a gate).
fn declaration_body<'a>(stmt: &'a str, keyword: &str) -> Option<&'a str> {
    stmt.strip_prefix(keyword)
        .map(str::trim_start)
        .filter(|rest| rest.starts_with('('))
}

/// Parses the body of an `INPUT(...)`/`OUTPUT(...)` declaration, with the
/// keyword already stripped.
fn parse_declaration(rest: &str, text: &str, line: usize) -> Result<String, FormatError> {
    let malformed = || FormatError::MalformedDeclaration {
        line,
        text: text.to_owned(),
    };

    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(malformed)?;

    Ok(check_name(inner.trim(), line)?.to_owned())
}

/// Parses a `name = OP(arg, ...)` line.
fn parse_gate_line(text: &str, line: usize) -> Result<Gate, FormatError> {
    let malformed = || FormatError::MalformedGate {
        line,
        text: text.to_owned(),
    };

    let (lhs, rhs) = text.split_once('=').ok_or_else(malformed)?;
    if rhs.contains('=') {
        return Err(malformed());
    }

    let output = check_name(lhs.trim(), line)?;

    let rhs = rhs.trim();
    let (op, args) = rhs.split_once('(').ok_or_else(malformed)?;
    let args = args.strip_suffix(')').ok_or_else(malformed)?;

    let op = op.trim_end();
    if op.is_empty() || !op.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(malformed());
    }
    let ty: GateType = op
        .parse()
        .map_err(|source| FormatError::UnknownOperation { line, source })?;

    if args.trim().is_empty() {
        return Err(malformed());
    }

    let mut operands = Vec::new();
    for arg in args.split(',') {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(malformed());
        }
        operands.push(check_name(arg, line)?.to_owned());
    }

    Gate::new(output, ty, operands).map_err(|source| FormatError::Arity { line, source })
}

/// Parses bench text into a [`Netlist`].
pub fn parse(text: &str) -> Result<Netlist, FormatError> {
    let mut builder = Netlist::builder();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let stmt = raw.trim();
        if stmt.is_empty() || stmt.starts_with('#') {
            continue;
        }

        if let Some(rest) = declaration_body(stmt, "INPUT") {
            let name = parse_declaration(rest, stmt, line)?;
            builder
                .add_input(name)
                .map_err(|source| FormatError::Duplicate { line, source })?;
        } else if let Some(rest) = declaration_body(stmt, "OUTPUT") {
            let name = parse_declaration(rest, stmt, line)?;
            builder.add_output(name);
        } else if stmt.contains('=') {
            let gate = parse_gate_line(stmt, line)?;
            builder
                .add_gate(gate)
                .map_err(|source| FormatError::Duplicate { line, source })?;
        } else {
            return Err(FormatError::UnrecognisedStatement {
                line,
                text: stmt.to_owned(),
            });
        }
    }

    let netlist = builder.build();
    debug!(
        inputs = netlist.num_inputs(),
        outputs = netlist.num_outputs(),
        gates = netlist.num_gates(),
        "parsed bench netlist"
    );
    Ok(netlist)
}

/// Writes a netlist as bench text, headed by a `# title` comment.
///
/// Every line of a multi-line title gets its own `# ` prefix.
pub fn write<W: Write>(netlist: &Netlist, title: &str, mut out: W) -> io::Result<()> {
    for line in title.split('\n') {
        writeln!(out, "# {}", line.trim_end_matches('\r'))?;
    }
    for name in netlist.inputs() {
        writeln!(out, "INPUT({name})\n")?;
    }
    for name in netlist.outputs() {
        writeln!(out, "OUTPUT({name})\n")?;
    }
    for gate in netlist.gates() {
        writeln!(
            out,
            "{:<width$} = {}({})",
            gate.output(),
            gate.ty(),
            gate.operands().join(", "),
            width = NAME_COLUMN
        )?;
    }
    out.flush()
}

/// Serializes a netlist to a bench string.
pub fn serialize(netlist: &Netlist, title: &str) -> String {
    let mut buf = Vec::new();
    write(netlist, title, &mut buf).expect("bench: write to vec");
    String::from_utf8(buf).expect("bench: names are utf-8")
}
