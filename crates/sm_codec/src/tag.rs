//! The `map` tag grammar: `"<name>,<option>,..."`.

use crate::Error;

/// A parsed `map` tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldTag<'a> {
    /// Explicit key segment; empty if the tag does not name the field.
    pub name: &'a str,
    pub required: bool,
    pub omit_empty: bool,
}

impl<'a> FieldTag<'a> {
    /// Parses a field's tag.
    ///
    /// Returns `Ok(None)` for `"-"`, which excludes the field. `"-,"` names the
    /// field `-`. A missing tag behaves like an empty one.
    pub fn parse(tag: Option<&'a str>) -> Result<Option<Self>, Error> {
        let Some(tag) = tag else {
            return Ok(Some(Self::default()));
        };

        if tag == "-" {
            return Ok(None);
        }

        let mut parts = tag.split(',');
        let mut this = Self {
            name: parts.next().unwrap_or_default(),
            ..Self::default()
        };

        for option in parts {
            match option {
                "required" => this.required = true,
                "omitempty" => this.omit_empty = true,
                "" => {}
                _ => return Err(Error::UnknownOption(option.to_owned())),
            }
        }

        if this.required && this.omit_empty {
            return Err(Error::ConflictingOptions);
        }

        Ok(Some(this))
    }
}

#[cfg(test)]
mod tests {
    use super::FieldTag;
    use crate::Error;

    fn parse(tag: &str) -> Option<FieldTag<'_>> {
        FieldTag::parse(Some(tag)).unwrap()
    }

    #[test]
    fn name_and_options() {
        let tag = parse("first_name,required").unwrap();
        assert_eq!(tag.name, "first_name");
        assert!(tag.required);
        assert!(!tag.omit_empty);

        let tag = parse(",omitempty,").unwrap();
        assert_eq!(tag.name, "");
        assert!(tag.omit_empty);

        assert_eq!(FieldTag::parse(None).unwrap(), Some(FieldTag::default()));
    }

    #[test]
    fn dash() {
        assert_eq!(parse("-"), None);
        assert_eq!(parse("-,").unwrap().name, "-");
        assert!(parse("-,required").unwrap().required);
    }

    #[test]
    fn invalid_options() {
        let err = FieldTag::parse(Some(",unknownopt")).unwrap_err();
        assert!(matches!(&err, Error::UnknownOption(opt) if opt == "unknownopt"));
        assert_eq!(err.to_string(), "unknown option unknownopt");

        let err = FieldTag::parse(Some("a,omitempty,required")).unwrap_err();
        assert!(matches!(err, Error::ConflictingOptions));
    }
}
