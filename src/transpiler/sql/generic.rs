use super::super::traits::SqlGenerator;

/// ANSI-leaning defaults with positional `?` markers.
pub struct GenericGenerator;

impl SqlGenerator for GenericGenerator {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn placeholder(&self, _name: &str, _index: usize) -> String {
        "?".to_string()
    }
}
