//! Variable substitution for script lines
//!
//! This module replaces `$(name)` references using the variable store.

use crate::error::{InterpolationError, InterpolationResult};
use crate::runner::VariableStore;
use regex::Regex;
use std::sync::OnceLock;

/// Longest variable name accepted inside `$(...)`
pub const MAX_VARIABLE_NAME_LEN: usize = 127;

const OPEN_REFERENCE: &str = "$(";

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\(([^)]*)\)").expect("reference pattern is valid"))
}

/// Interpolate variables in a line
///
/// Each `$(name)` is replaced by the value of the first definition of
/// `name`. Substituted values are inserted as-is and not scanned again.
pub fn interpolate(line: &str, vars: &VariableStore) -> InterpolationResult<String> {
    let mut result = String::with_capacity(line.len());
    let mut last = 0;

    for caps in reference_pattern().captures_iter(line) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        if name.chars().count() > MAX_VARIABLE_NAME_LEN {
            return Err(InterpolationError::NameTooLong);
        }
        let value = vars
            .get(name)
            .ok_or_else(|| InterpolationError::UndefinedVariable(name.to_string()))?;

        result.push_str(&line[last..whole.start()]);
        result.push_str(value);
        last = whole.end();
    }

    // Any `$(` left over has no `)` after it
    let tail = &line[last..];
    if tail.contains(OPEN_REFERENCE) {
        return Err(InterpolationError::UnterminatedVariable);
    }
    result.push_str(tail);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> VariableStore {
        let mut vars = VariableStore::new();
        for (name, value) in pairs {
            vars.define(*name, *value);
        }
        vars
    }

    #[test]
    fn test_simple_interpolation() {
        let vars = store(&[("greeting", "hello")]);
        let result = interpolate("print $(greeting) world", &vars).unwrap();
        assert_eq!(result, "print hello world");
    }

    #[test]
    fn test_multiple_variables() {
        let vars = store(&[("CC", "gcc"), ("OUT", "app")]);
        let result = interpolate("$(CC) -o $(OUT) $(OUT).c", &vars).unwrap();
        assert_eq!(result, "gcc -o app app.c");
    }

    #[test]
    fn test_adjacent_references() {
        let vars = store(&[("a", "1"), ("b", "2")]);
        assert_eq!(interpolate("$(a)$(b)", &vars).unwrap(), "12");
    }

    #[test]
    fn test_no_interpolation() {
        let vars = VariableStore::new();
        let result = interpolate("No variables here", &vars).unwrap();
        assert_eq!(result, "No variables here");
    }

    #[test]
    fn test_dollar_without_paren_is_literal() {
        let vars = store(&[("x", "v")]);
        assert_eq!(interpolate("cost $5 $$(x)", &vars).unwrap(), "cost $5 $v");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let vars = store(&[("inner", "value"), ("outer", "$(inner)")]);
        let result = interpolate("Result: $(outer)", &vars).unwrap();
        assert_eq!(result, "Result: $(inner)");
    }

    #[test]
    fn test_undefined_variable() {
        let vars = VariableStore::new();
        let result = interpolate("Hello, $(undefined)!", &vars);
        assert_eq!(
            result,
            Err(InterpolationError::UndefinedVariable("undefined".to_string()))
        );
    }

    #[test]
    fn test_empty_name_is_undefined() {
        let vars = VariableStore::new();
        assert!(matches!(
            interpolate("$()", &vars),
            Err(InterpolationError::UndefinedVariable(_))
        ));
    }

    #[test]
    fn test_unterminated_reference() {
        let vars = store(&[("name", "x")]);
        assert_eq!(
            interpolate("print $(name", &vars),
            Err(InterpolationError::UnterminatedVariable)
        );
        assert_eq!(
            interpolate("$(name) then $(name", &vars),
            Err(InterpolationError::UnterminatedVariable)
        );
    }

    #[test]
    fn test_name_too_long() {
        let vars = VariableStore::new();
        let line = format!("$({})", "n".repeat(MAX_VARIABLE_NAME_LEN + 1));
        assert_eq!(interpolate(&line, &vars), Err(InterpolationError::NameTooLong));
    }

    #[test]
    fn test_first_definition_is_substituted() {
        let vars = store(&[("v", "first"), ("v", "second")]);
        assert_eq!(interpolate("$(v)", &vars).unwrap(), "first");
    }
}
