//! # Aggregation modes.
//!
//! A [`TriggerMode`] decides how per-listener results become the value a
//! dispatch returns.
//!
//! ## Variants
//! | Mode            | Result                                          | Short-circuits |
//! |-----------------|-------------------------------------------------|----------------|
//! | `Default`       | `null`                                          | no             |
//! | `All`           | array of results                                | no             |
//! | `Concat`        | array of results, arrays flattened one level    | no             |
//! | `Merge`         | shallow union of object results, right-most wins| no             |
//! | `Last`          | last result                                     | no             |
//! | `First`         | first invoked listener's result                 | yes            |
//! | `Pipe`          | each listener gets the previous result as arg 0 | no             |
//! | `UntilTrue`     | stops at the first `true`                       | yes            |
//! | `UntilFalse`    | stops at the first `false`                      | yes            |
//! | `FirstNonEmpty` | first non-null result                           | yes            |
//! | `Raw`           | unreduced results (pending ones left pending)   | no             |
//!
//! `Pipe`, `UntilTrue`, `UntilFalse` and `FirstNonEmpty` are *consequent*:
//! each call depends on the previous listener's result, so a pending result
//! delays every later listener of the pass.

use serde_json::{Map, Value};

/// Rule for combining listener results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    #[default]
    Default,
    All,
    Concat,
    Merge,
    Last,
    First,
    Pipe,
    UntilTrue,
    UntilFalse,
    FirstNonEmpty,
    Raw,
}

impl TriggerMode {
    /// True for modes where each call depends on the previous result.
    #[inline]
    pub fn is_consequent(self) -> bool {
        matches!(
            self,
            TriggerMode::Pipe
                | TriggerMode::UntilTrue
                | TriggerMode::UntilFalse
                | TriggerMode::FirstNonEmpty
        )
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            TriggerMode::Default => "default",
            TriggerMode::All => "all",
            TriggerMode::Concat => "concat",
            TriggerMode::Merge => "merge",
            TriggerMode::Last => "last",
            TriggerMode::First => "first",
            TriggerMode::Pipe => "pipe",
            TriggerMode::UntilTrue => "until_true",
            TriggerMode::UntilFalse => "until_false",
            TriggerMode::FirstNonEmpty => "first_non_empty",
            TriggerMode::Raw => "raw",
        }
    }

    /// Whether `value` ends a consequent pass.
    pub(crate) fn stops_at(self, value: &Value) -> bool {
        match self {
            TriggerMode::UntilTrue => *value == Value::Bool(true),
            TriggerMode::UntilFalse => *value == Value::Bool(false),
            TriggerMode::FirstNonEmpty => !value.is_null(),
            _ => false,
        }
    }

    /// Result of a pass in which no listener produced anything.
    pub(crate) fn empty_result(self, args: &[Value]) -> Value {
        match self {
            TriggerMode::Pipe => args.first().cloned().unwrap_or(Value::Null),
            TriggerMode::All | TriggerMode::Concat | TriggerMode::Raw => Value::Array(Vec::new()),
            TriggerMode::Merge => Value::Object(Map::new()),
            _ => Value::Null,
        }
    }

    /// Arguments for the next listener of a consequent pass.
    ///
    /// `Pipe` replaces the first argument with the previous result; the other
    /// consequent modes pass the original arguments through.
    pub(crate) fn next_args(self, previous: Option<Value>, args: &[Value]) -> Vec<Value> {
        match (self, previous) {
            (TriggerMode::Pipe, Some(prev)) => {
                let mut next = Vec::with_capacity(args.len().max(1));
                next.push(prev);
                next.extend(args.iter().skip(1).cloned());
                next
            }
            _ => args.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_consequent_modes() {
        assert!(TriggerMode::Pipe.is_consequent());
        assert!(TriggerMode::FirstNonEmpty.is_consequent());
        assert!(!TriggerMode::First.is_consequent());
        assert!(!TriggerMode::Raw.is_consequent());
    }

    #[test]
    fn test_stop_conditions() {
        assert!(TriggerMode::UntilTrue.stops_at(&json!(true)));
        assert!(!TriggerMode::UntilTrue.stops_at(&json!(1)));
        assert!(TriggerMode::UntilFalse.stops_at(&json!(false)));
        assert!(TriggerMode::FirstNonEmpty.stops_at(&json!(0)));
        assert!(!TriggerMode::FirstNonEmpty.stops_at(&Value::Null));
        assert!(!TriggerMode::Pipe.stops_at(&json!(true)));
    }

    #[test]
    fn test_pipe_replaces_first_argument() {
        let args = [json!(1), json!("x")];
        assert_eq!(
            TriggerMode::Pipe.next_args(Some(json!(5)), &args),
            vec![json!(5), json!("x")]
        );
        assert_eq!(TriggerMode::Pipe.next_args(None, &args), args.to_vec());
        assert_eq!(TriggerMode::Pipe.next_args(Some(json!(5)), &[]), vec![json!(5)]);
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(TriggerMode::Pipe.empty_result(&[json!(7)]), json!(7));
        assert_eq!(TriggerMode::All.empty_result(&[]), json!([]));
        assert_eq!(TriggerMode::Merge.empty_result(&[]), json!({}));
        assert_eq!(TriggerMode::Last.empty_result(&[]), Value::Null);
    }
}
