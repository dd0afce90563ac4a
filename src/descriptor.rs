//! JVM field and method descriptors.
//!
//! Only the parts of the grammar the merge needs are modelled: argument types, their local
//! variable width, and class-name substitution.
//!
//! ```text
//! FieldType  := B | C | D | F | I | J | S | Z | L<internal name>; | [FieldType
//! Method     := ( FieldType* ) ( FieldType | V )
//! ```

use std::fmt;

use crate::{Error::InvalidDescriptor, Result};

/// Nesting limit for array dimensions, as enforced by the class file format.
const MAX_ARRAY_DIMENSIONS: usize = 255;

/// A single field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A primitive, stored as its descriptor character (`B C D F I J S Z`)
    Base(char),
    /// A class or interface, by internal name (`java/lang/String`)
    Object(String),
    /// An array of the inner element type
    Array(Box<FieldType>),
}

impl FieldType {
    /// Number of local variable slots a value of this type occupies.
    ///
    /// `long` and `double` take two slots, everything else (references included) takes one.
    #[must_use]
    pub fn slot_width(&self) -> usize {
        match self {
            FieldType::Base('J' | 'D') => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Base(c) => write!(f, "{c}"),
            FieldType::Object(name) => write!(f, "L{name};"),
            FieldType::Array(inner) => write!(f, "[{inner}"),
        }
    }
}

/// A parsed method descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Declared argument types in order
    pub params: Vec<FieldType>,
    /// The return type, `None` for `void`
    pub ret: Option<FieldType>,
}

impl MethodDescriptor {
    /// Parses a complete method descriptor.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidDescriptor`] if `text` does not follow the grammar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tinymerge::descriptor::MethodDescriptor;
    ///
    /// let desc = MethodDescriptor::parse("(IJ[Ljava/lang/String;)V")?;
    /// assert_eq!(desc.params.len(), 3);
    /// assert_eq!(desc.slots(true), vec![1, 2, 4]);
    /// # Ok::<(), tinymerge::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<MethodDescriptor> {
        let mut parser = DescriptorParser::new(text);
        let desc = parser.parse_method()?;
        parser.expect_end()?;
        Ok(desc)
    }

    /// Local variable slot of every argument.
    ///
    /// Instance methods reserve slot 0 for the receiver, so their first argument lives at slot 1.
    #[must_use]
    pub fn slots(&self, has_receiver: bool) -> Vec<usize> {
        let mut slot = usize::from(has_receiver);
        self.params
            .iter()
            .map(|param| {
                let current = slot;
                slot += param.slot_width();
                current
            })
            .collect()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for param in &self.params {
            write!(f, "{param}")?;
        }
        write!(f, ")")?;
        match &self.ret {
            Some(ret) => write!(f, "{ret}"),
            None => write!(f, "V"),
        }
    }
}

/// Cursor over a descriptor string.
///
/// # Example
///
/// ```rust
/// use tinymerge::descriptor::{DescriptorParser, FieldType};
///
/// let mut parser = DescriptorParser::new("[[I");
/// let ty = parser.parse_field_type()?;
/// assert_eq!(ty.to_string(), "[[I");
/// # Ok::<(), tinymerge::Error>(())
/// ```
pub struct DescriptorParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    /// Create a new parser at the start of `text`
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        DescriptorParser { text, pos: 0 }
    }

    fn error(&self, reason: &str) -> crate::Error {
        InvalidDescriptor(format!("{reason} at offset {} of \"{}\"", self.pos, self.text))
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.next() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{expected}'"))),
        }
    }

    /// Fails unless the whole input was consumed.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidDescriptor`] on trailing input.
    pub fn expect_end(&self) -> Result<()> {
        if self.pos == self.text.len() {
            Ok(())
        } else {
            Err(self.error("trailing characters"))
        }
    }

    /// Parse one field type.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidDescriptor`] for an unknown tag, an unterminated or empty
    /// class name, or too many array dimensions.
    pub fn parse_field_type(&mut self) -> Result<FieldType> {
        let mut dimensions = 0;
        while self.peek() == Some('[') {
            self.pos += 1;
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(self.error("too many array dimensions"));
            }
        }

        let mut ty = match self.next() {
            Some(c @ ('B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z')) => FieldType::Base(c),
            Some('L') => {
                let rest = &self.text[self.pos..];
                let Some(end) = rest.find(';') else {
                    return Err(self.error("unterminated class name"));
                };
                if end == 0 {
                    return Err(self.error("empty class name"));
                }

                let name = rest[..end].to_string();
                self.pos += end + 1;
                FieldType::Object(name)
            }
            Some(_) => return Err(self.error("invalid type tag")),
            None => return Err(self.error("unexpected end")),
        };

        for _ in 0..dimensions {
            ty = FieldType::Array(Box::new(ty));
        }
        Ok(ty)
    }

    /// Parse a method descriptor.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidDescriptor`] if the argument list or return type is
    /// malformed.
    pub fn parse_method(&mut self) -> Result<MethodDescriptor> {
        self.expect('(')?;

        let mut params = Vec::new();
        loop {
            match self.peek() {
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => params.push(self.parse_field_type()?),
                None => return Err(self.error("unterminated argument list")),
            }
        }

        let ret = if self.peek() == Some('V') {
            self.pos += 1;
            None
        } else {
            Some(self.parse_field_type()?)
        };

        Ok(MethodDescriptor { params, ret })
    }
}

/// Rewrites every class name in a field or method descriptor through `lookup`.
///
/// Names `lookup` does not know are kept as they are.
///
/// # Errors
/// Returns [`crate::Error::InvalidDescriptor`] if an object type is not terminated by `;`.
///
/// # Examples
///
/// ```rust
/// use tinymerge::descriptor::remap;
///
/// let desc = remap("(La;I)[Lb;", |name| match name {
///     "a" => Some("net/example/Alpha"),
///     _ => None,
/// })?;
/// assert_eq!(desc, "(Lnet/example/Alpha;I)[Lb;");
/// # Ok::<(), tinymerge::Error>(())
/// ```
pub fn remap<'a, F>(descriptor: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(descriptor.len());
    let mut rest = descriptor;

    while let Some(start) = rest.find('L') {
        let (before, object) = rest.split_at(start + 1);
        out.push_str(before);

        let Some(end) = object.find(';') else {
            return Err(InvalidDescriptor(format!(
                "unterminated class name in \"{descriptor}\""
            )));
        };

        let name = &object[..end];
        out.push_str(lookup(name).unwrap_or(name));
        out.push(';');
        rest = &object[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
