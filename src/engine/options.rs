use indexmap::IndexMap;

use crate::value::Value;

/// Behavior flags for one chain. Built once when the chain is created
/// and never mutated afterwards; child scopes share the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Allow populating members whose current value is Undefined.
    pub override_undefined: bool,
    /// Refuse assignments that would change a member's tag.
    pub maintain_data_type: bool,
    /// Replace `{$name}` placeholders inside strings.
    pub replace_variables: bool,
    /// Resolve whole-string variable references (`$name`) to their
    /// values with the type preserved.
    pub evaluate_variables: bool,
    /// Record every invocation result in `$result`/`$results`.
    pub store_results: bool,
    /// Deep-evaluate variables inside argument lists.
    pub evaluate_arguments: bool,
    /// Unrecognized keys from a caller-supplied option object, passed
    /// through untouched.
    pub extra: IndexMap<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            override_undefined: false,
            maintain_data_type: true,
            replace_variables: true,
            evaluate_variables: true,
            store_results: true,
            evaluate_arguments: true,
            extra: IndexMap::new(),
        }
    }
}

impl Options {
    /// Merges a caller-supplied option object over the defaults.
    /// Recognized keys must be booleans (anything else keeps the
    /// default); everything unrecognized lands in `extra`.
    pub fn from_object(value: &Value) -> Self {
        let mut options = Options::default();

        let map = match value.as_object() {
            Some(map) => map,
            None => return options,
        };

        for (key, entry) in map.iter() {
            let flag = entry.as_bool();
            match (key.as_str(), flag) {
                ("overrideUndefined", Some(b)) => options.override_undefined = b,
                ("maintainDataType", Some(b)) => options.maintain_data_type = b,
                ("replaceVariables", Some(b)) => options.replace_variables = b,
                ("evaluateVariables", Some(b)) => options.evaluate_variables = b,
                ("storeResults", Some(b)) => options.store_results = b,
                ("evaluateArguments", Some(b)) => options.evaluate_arguments = b,
                _ => {
                    options.extra.insert(key.clone(), entry.clone());
                }
            }
        }

        options
    }
}
