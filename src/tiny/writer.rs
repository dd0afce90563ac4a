//! Emits tiny v2 records into an in-memory buffer.

use crate::{
    tiny::{
        codec::{escape_into, needs_escape, SEPARATOR},
        header::Header,
    },
    Result,
};

/// Record emitter bound to one header.
///
/// Every name list must have exactly one entry per namespace column, names are escaped when the
/// header carries `escaped-names`.
///
/// # Examples
///
/// ```rust
/// use tinymerge::tiny::{Header, TinyWriter};
///
/// let mut writer = TinyWriter::new(&Header::new(["named", "official"]));
/// writer.class(&["a/Named", "b"])?;
/// writer.method("()V", &["run", "c"])?;
/// writer.param(1, &["value", ""])?;
///
/// assert_eq!(
///     writer.finish(),
///     "tiny\t2\t0\tnamed\tofficial\nc\ta/Named\tb\n\tm\t()V\trun\tc\n\t\tp\t1\tvalue\t\n"
/// );
/// # Ok::<(), tinymerge::Error>(())
/// ```
pub struct TinyWriter {
    out: String,
    escaped: bool,
    columns: usize,
}

impl TinyWriter {
    /// Starts a new table with the rendered `header`.
    #[must_use]
    pub fn new(header: &Header) -> TinyWriter {
        TinyWriter {
            out: header.render(),
            escaped: header.escaped_names(),
            columns: header.namespaces.len(),
        }
    }

    /// Writes a class record.
    ///
    /// # Errors
    /// Returns [`crate::Error::StructuralViolation`] if the name count does not match the
    /// namespace count, or a name needs escaping in an unescaped table.
    pub fn class<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.check(names)?;
        self.out.push('c');
        self.names(names);
        Ok(())
    }

    /// Writes a method record; `descriptor` must be in the primary namespace.
    ///
    /// # Errors
    /// See [`TinyWriter::class`].
    pub fn method<S: AsRef<str>>(&mut self, descriptor: &str, names: &[S]) -> Result<()> {
        self.member('m', descriptor, names)
    }

    /// Writes a field record; `descriptor` must be in the primary namespace.
    ///
    /// # Errors
    /// See [`TinyWriter::class`].
    pub fn field<S: AsRef<str>>(&mut self, descriptor: &str, names: &[S]) -> Result<()> {
        self.member('f', descriptor, names)
    }

    /// Writes a parameter record for the local variable `slot` of the last method.
    ///
    /// # Errors
    /// See [`TinyWriter::class`].
    pub fn param<S: AsRef<str>>(&mut self, slot: usize, names: &[S]) -> Result<()> {
        self.check(names)?;
        self.out.push_str("\t\tp");
        self.out.push(SEPARATOR);
        self.out.push_str(&slot.to_string());
        self.names(names);
        Ok(())
    }

    /// Returns the rendered table.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn member<S: AsRef<str>>(&mut self, section: char, descriptor: &str, names: &[S]) -> Result<()> {
        self.check(names)?;
        self.check_name(descriptor)?;

        self.out.push(SEPARATOR);
        self.out.push(section);
        self.out.push(SEPARATOR);
        self.push_name(descriptor);
        self.names(names);
        Ok(())
    }

    fn check<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        if names.len() != self.columns {
            return Err(structural_error!(
                "expected {} names but got {}",
                self.columns,
                names.len()
            ));
        }

        names.iter().try_for_each(|name| self.check_name(name.as_ref()))
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if !self.escaped && needs_escape(name) {
            return Err(structural_error!(
                "{:?} contains a separator but the table is not escaped",
                name
            ));
        }
        Ok(())
    }

    fn names<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.out.push(SEPARATOR);
            self.push_name(name.as_ref());
        }
        self.out.push('\n');
    }

    fn push_name(&mut self, name: &str) {
        if self.escaped {
            escape_into(&mut self.out, name);
        } else {
            self.out.push_str(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tiny::TinyFile, Error};

    #[test]
    fn escaped_output_reads_back() {
        let mut header = Header::new(["named", "official"]);
        header.set_escaped_names(true);

        let mut writer = TinyWriter::new(&header);
        writer.class(&["odd\tname", "a"]).unwrap();
        writer.field("I", &["line\nbreak", "b"]).unwrap();
        writer.method("(J)V", &["back\\slash", "c"]).unwrap();
        writer.param(1, &["nul\0", ""]).unwrap();
        let text = writer.finish();

        assert!(text.contains("c\todd\\tname\ta\n"));

        let file = TinyFile::parse(&text).unwrap();
        let class = &file.classes[0];
        assert_eq!(class.names, ["odd\tname", "a"]);
        assert_eq!(class.fields[0].names[0], "line\nbreak");
        assert_eq!(class.methods[0].names[0], "back\\slash");
        assert_eq!(class.methods[0].params[0].names, ["nul\0", ""]);
    }

    #[test]
    fn rejects_wrong_name_count() {
        let mut writer = TinyWriter::new(&Header::new(["named", "official"]));
        let err = writer.class(&["only"]).unwrap_err();
        assert!(matches!(err, Error::StructuralViolation(_)));
    }

    #[test]
    fn rejects_separator_when_unescaped() {
        let mut writer = TinyWriter::new(&Header::new(["named", "official"]));
        let err = writer.class(&["tab\there", "a"]).unwrap_err();
        assert!(matches!(err, Error::StructuralViolation(_)));

        // Backslashes are fine without escaping
        writer.class(&["back\\slash", "a"]).unwrap();
    }
}
