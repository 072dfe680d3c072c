//! Result reducers for the non-consequent modes.
//!
//! When every result is ready the reduction happens in place; otherwise the
//! reduction itself becomes pending and runs once all results settle.

use futures::future::try_join_all;
use serde_json::{Map, Value};

use super::mode::TriggerMode;
use super::scheduler::detach;
use crate::outcome::Outcome;

/// Reduces collected listener results according to `mode`.
pub(crate) fn reduce(mode: TriggerMode, outcomes: Vec<Outcome>) -> Outcome {
    if mode == TriggerMode::Default {
        outcomes.into_iter().for_each(detach);
        return Outcome::null();
    }

    if !outcomes.iter().any(Outcome::is_pending) {
        let values = outcomes.into_iter().filter_map(Outcome::into_ready).collect();
        return Outcome::Ready(reduce_values(mode, values));
    }

    Outcome::pending(async move {
        let values = try_join_all(outcomes.into_iter().map(Outcome::resolve)).await?;
        Ok(reduce_values(mode, values))
    })
}

/// Reduces settled values.
pub(crate) fn reduce_values(mode: TriggerMode, values: Vec<Value>) -> Value {
    match mode {
        TriggerMode::All | TriggerMode::Raw => Value::Array(values),
        TriggerMode::Concat => {
            let mut flat = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    Value::Array(items) => flat.extend(items),
                    other => flat.push(other),
                }
            }
            Value::Array(flat)
        }
        TriggerMode::Merge => {
            let mut merged = Map::new();
            for value in values {
                if let Value::Object(fields) = value {
                    merged.extend(fields);
                }
            }
            Value::Object(merged)
        }
        TriggerMode::Last | TriggerMode::First => values.into_iter().last().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_concat_flattens_one_level() {
        let out = reduce_values(
            TriggerMode::Concat,
            vec![json!([1, 2]), json!(3), json!([[4]])],
        );
        assert_eq!(out, json!([1, 2, 3, [4]]));
    }

    #[test]
    fn test_merge_right_most_wins() {
        let out = reduce_values(
            TriggerMode::Merge,
            vec![json!({"a": 1, "b": 1}), json!("skip"), json!({"b": 2})],
        );
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(reduce_values(TriggerMode::All, vec![]), json!([]));
        assert_eq!(reduce_values(TriggerMode::Merge, vec![]), json!({}));
        assert_eq!(reduce_values(TriggerMode::Last, vec![]), Value::Null);
    }

    #[tokio::test]
    async fn test_pending_reduction_waits_for_all() {
        let outcomes = vec![
            Outcome::from(json!([1])),
            Outcome::pending(async { Ok(json!([2, 3])) }),
        ];
        let reduced = reduce(TriggerMode::Concat, outcomes);
        assert!(reduced.is_pending());
        assert_eq!(reduced.resolve().await.unwrap(), json!([1, 2, 3]));
    }
}
