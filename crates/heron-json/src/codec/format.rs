//! Output formatting: indentation and string escaping.

use std::io;

use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::options::{Escaping, JsonSerializerOptions};

const INDENT: &[u8] = b"  ";

/// `serde_json` formatter driven by [`JsonSerializerOptions`].
pub(crate) struct OptionsFormatter {
    layout: Layout,
    escaping: Escaping,
}

enum Layout {
    Compact(CompactFormatter),
    Pretty(PrettyFormatter<'static>),
}

impl OptionsFormatter {
    pub(crate) fn new(options: &JsonSerializerOptions) -> Self {
        let layout = if options.write_indented {
            Layout::Pretty(PrettyFormatter::with_indent(INDENT))
        } else {
            Layout::Compact(CompactFormatter)
        };

        Self {
            layout,
            escaping: options.escaping,
        }
    }
}

macro_rules! delegate_layout {
    ($self:ident, $method:ident($($arg:expr),*)) => {
        match &mut $self.layout {
            Layout::Compact(f) => f.$method($($arg),*),
            Layout::Pretty(f) => f.$method($($arg),*),
        }
    };
}

impl Formatter for OptionsFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, begin_array(writer))
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, end_array(writer))
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        delegate_layout!(self, begin_array_value(writer, first))
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, end_array_value(writer))
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, begin_object(writer))
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, end_object(writer))
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        delegate_layout!(self, begin_object_key(writer, first))
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, begin_object_value(writer))
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        delegate_layout!(self, end_object_value(writer))
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        match self.escaping {
            Escaping::UnsafeRelaxed => writer.write_all(fragment.as_bytes()),
            Escaping::Default => write_escaped(writer, fragment),
        }
    }
}

fn needs_escape(c: char) -> bool {
    !c.is_ascii() || matches!(c, '<' | '>' | '&' | '\'' | '+' | '`')
}

fn write_escaped<W: ?Sized + io::Write>(writer: &mut W, fragment: &str) -> io::Result<()> {
    let mut start = 0;

    for (i, c) in fragment.char_indices() {
        if !needs_escape(c) {
            continue;
        }

        if start < i {
            writer.write_all(fragment[start..i].as_bytes())?;
        }

        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
            write!(writer, "\\u{unit:04X}")?;
        }

        start = i + c.len_utf8();
    }

    if start < fragment.len() {
        writer.write_all(fragment[start..].as_bytes())?;
    }

    Ok(())
}
