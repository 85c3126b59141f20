//! Renders [`CdifValue`] trees as cDIF text.
//!
//! Flat mode writes `{a: 1, b: 2}`. With an indent string every entry goes on
//! its own line, one indent deeper than the structure that holds it:
//!
//! ```text
//! {
//!     a: 1;
//!     b: 2;
//! }
//! ```
//!
//! Primitive values are written with their canonical text, so the output of
//! a stringify is itself canonical and stringifying its parse gives back the
//! same text.

use crate::options::SerializerOptions;
use crate::structure::CdifValue;

pub(crate) fn stringify(value: &CdifValue, options: &SerializerOptions) -> String {
    let mut writer = Writer {
        output: String::new(),
        options,
        depth: 0,
    };
    writer.write_value(value);
    writer.output
}

struct Writer<'o> {
    output: String,
    options: &'o SerializerOptions,
    depth: usize,
}

impl Writer<'_> {
    fn write_value(&mut self, value: &CdifValue) {
        match value {
            CdifValue::Primitive(primitive) => self.output.push_str(&primitive.cdif_text()),
            CdifValue::Object(object) => {
                self.write_type_name(object.type_name());
                self.write_structure('{', '}', object.iter(), |writer, (key, value)| {
                    writer.output.push_str(key);
                    writer.output.push_str(": ");
                    writer.write_value(value);
                });
            }
            CdifValue::Collection(collection) => {
                self.write_type_name(collection.type_name());
                self.write_structure('[', ']', collection.items().iter(), Self::write_value);
            }
        }
    }

    fn write_type_name(&mut self, type_name: Option<&str>) {
        if let Some(type_name) = type_name {
            self.output.push_str(type_name);
            self.output.push(' ');
        }
    }

    fn write_structure<I, T, F>(&mut self, open: char, close: char, entries: I, mut write_entry: F)
    where
        I: ExactSizeIterator<Item = T>,
        F: FnMut(&mut Self, T),
    {
        self.output.push(open);
        let count = entries.len();
        if count == 0 {
            self.output.push(close);
            return;
        }

        let separator = self.options.separator.as_str();
        let final_separator = self.options.adds_final_separator();
        self.depth += 1;
        for (index, entry) in entries.enumerate() {
            let last = index + 1 == count;
            self.newline();
            write_entry(self, entry);
            if !last || final_separator {
                self.output.push_str(separator);
            }
            if !last && self.options.indent.is_none() {
                self.output.push(' ');
            }
        }
        self.depth -= 1;
        self.newline();
        self.output.push(close);
    }

    /// Starts a new line at the current depth. Does nothing in flat mode.
    fn newline(&mut self) {
        if let Some(indent) = &self.options.indent {
            self.output.push('\n');
            for _ in 0..self.depth {
                self.output.push_str(indent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Separator;
    use crate::primitive::PrimitiveValue;
    use crate::structure::{Collection, Object};
    use indexmap::IndexMap;

    fn int(value: i64) -> CdifValue {
        CdifValue::from(PrimitiveValue::integer(value.into(), 1))
    }

    fn sample() -> CdifValue {
        let list = Collection::new(vec![int(1), int(2)], Some("Pair".to_string())).unwrap();
        let mut entries = IndexMap::new();
        let name = PrimitiveValue::from_native_string("x", 1);
        entries.insert("name".to_string(), CdifValue::from(name));
        entries.insert("items".to_string(), CdifValue::from(list));
        entries.insert("empty".to_string(), CdifValue::from(Object::default()));
        CdifValue::from(Object::new(entries, None).unwrap())
    }

    #[test]
    fn test_flat() {
        let text = stringify(&sample(), &SerializerOptions::new());
        assert_eq!(text, "{name: \"x\", items: Pair [1, 2], empty: {}}");
    }

    #[test]
    fn test_flat_with_final_separator() {
        let options = SerializerOptions::new().with_final_separator(true);
        let text = stringify(&sample(), &options);
        assert_eq!(text, "{name: \"x\", items: Pair [1, 2,], empty: {},}");
    }

    #[test]
    fn test_indented_semicolons() {
        let text = stringify(&sample(), &SerializerOptions::pretty());
        assert_eq!(
            text,
            "{\n\tname: \"x\";\n\titems: Pair [\n\t\t1;\n\t\t2;\n\t];\n\tempty: {};\n}"
        );
    }

    #[test]
    fn test_indented_commas_without_final_separator() {
        let options = SerializerOptions::new()
            .with_indent("  ")
            .with_separator(Separator::Comma);
        let text = stringify(&sample(), &options);
        assert_eq!(
            text,
            "{\n  name: \"x\",\n  items: Pair [\n    1,\n    2\n  ],\n  empty: {}\n}"
        );
    }

    #[test]
    fn test_primitive_root() {
        let text = stringify(&int(-7), &SerializerOptions::pretty());
        assert_eq!(text, "-7");
    }
}
