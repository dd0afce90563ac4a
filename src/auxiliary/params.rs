use std::collections::HashMap;

use crate::{error::ResultExt, params::MemberIndex, Result};

/// Header line of the parameter name table.
pub const PARAMS_HEADER: &str = "param,name,side";

/// Curated parameter names by member index and slot.
///
/// Read from a CSV table with the header `param,name,side`, where `param` is the synthesized
/// name being replaced (`p_<n>_<slot>_` or `p_i<n>_<slot>_`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterNames {
    names: HashMap<MemberIndex, Vec<Option<String>>>,
}

impl ParameterNames {
    /// Parses a parameter name table.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidAuxiliary`] for a missing header, a line without a name
    /// column, a malformed `param` column, or a slot named twice. Line errors carry the line
    /// number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tinymerge::{auxiliary::ParameterNames, params::MemberIndex};
    ///
    /// let names = ParameterNames::parse("param,name,side\np_i999_1_,width,2\np_i999_2_,height,2\n")?;
    /// let list = names.get(&MemberIndex::Indexed(999)).unwrap();
    /// assert_eq!(list[1].as_deref(), Some("width"));
    /// assert_eq!(list[0], None);
    /// # Ok::<(), tinymerge::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<ParameterNames> {
        let mut lines = text.lines();

        match lines.next().map(str::trim_end) {
            Some(PARAMS_HEADER) => {}
            other => {
                return Err(auxiliary_error!(
                    "expected header \"{}\", found {:?}",
                    PARAMS_HEADER,
                    other.unwrap_or_default()
                ))
                .at_line(1)
            }
        }

        let mut names: HashMap<MemberIndex, Vec<Option<String>>> = HashMap::new();
        for (offset, line) in lines.enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let (index, slot, name) = Self::parse_line(line).at_line(offset + 2)?;
            let list = names.entry(index).or_default();
            if list.len() <= slot {
                list.resize(slot + 1, None);
            }

            if let Some(existing) = &list[slot] {
                return Err(auxiliary_error!(
                    "slot {} already named \"{}\"",
                    slot,
                    existing
                ))
                .at_line(offset + 2);
            }

            if !name.is_empty() {
                list[slot] = Some(name.to_string());
            }
        }

        Ok(ParameterNames { names })
    }

    fn parse_line(line: &str) -> Result<(MemberIndex, usize, &str)> {
        let mut columns = line.split(',');
        let param = columns.next().unwrap_or_default();
        let Some(name) = columns.next() else {
            return Err(auxiliary_error!("missing name column in \"{}\"", line));
        };

        let invalid = || auxiliary_error!("invalid parameter \"{}\"", param);

        let body = param.strip_suffix('_').ok_or_else(invalid)?;
        let (prefix, slot) = body.rsplit_once('_').ok_or_else(invalid)?;
        let index = MemberIndex::parse_prefix(prefix).ok_or_else(invalid)?;
        if slot.is_empty() || !slot.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let slot = slot.parse::<usize>().map_err(|_| invalid())?;

        Ok((index, slot, name))
    }

    /// Names of `index` by slot.
    #[must_use]
    pub fn get(&self, index: &MemberIndex) -> Option<&[Option<String>]> {
        self.names.get(index).map(Vec::as_slice)
    }

    /// Returns `true` if any parameter of `index` is named.
    #[must_use]
    pub fn contains(&self, index: &MemberIndex) -> bool {
        self.names.contains_key(index)
    }

    /// Number of members with named parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn parse_table() {
        let text = "param,name,side\r\np_12345_0_,args,1\r\np_i999_2_,height,2\np_i999_1_,width,2\n\n";
        let names = ParameterNames::parse(text).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(
            names.get(&MemberIndex::Numbered(12345)).unwrap(),
            [Some("args".to_string())]
        );
        assert_eq!(
            names.get(&MemberIndex::Indexed(999)).unwrap(),
            [None, Some("width".to_string()), Some("height".to_string())]
        );
        assert!(!names.contains(&MemberIndex::Numbered(999)));
    }

    #[test]
    fn header_is_required() {
        let err = ParameterNames::parse("p_1_0_,x,0\n").unwrap_err();
        assert!(matches!(err, Error::AtLine { line: 1, .. }));
        assert!(matches!(err.root(), Error::InvalidAuxiliary(_)));

        assert!(ParameterNames::parse("").is_err());
        assert!(ParameterNames::parse("param,name,side").unwrap().is_empty());
    }

    #[test]
    fn malformed_params() {
        for line in ["p_1_0_", "p_1_0,x,0", "q_1_0_,x,0", "p_1_x_,x,0", "p_a_0_,x,0", "p_1__,x,0"] {
            let text = format!("param,name,side\n{line}\n");
            let err = ParameterNames::parse(&text).unwrap_err();
            assert!(matches!(err, Error::AtLine { line: 2, .. }), "{line}");
            assert!(matches!(err.root(), Error::InvalidAuxiliary(_)), "{line}");
        }
    }

    #[test]
    fn duplicate_slot() {
        let text = "param,name,side\np_1_1_,a,0\np_1_1_,b,0\n";
        let err = ParameterNames::parse(text).unwrap_err();
        assert!(matches!(err, Error::AtLine { line: 3, .. }));
    }
}
