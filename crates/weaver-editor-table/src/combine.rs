//! Combining many validation results into one.
//!
//! Validators return `Result<T, Vec<E>>` so every problem can be reported at
//! once. These helpers fold a batch of such results: all values when every
//! one succeeded, otherwise every error in input order.

use serde_json::{Map, Value};

/// Split results into their values and their errors, keeping order.
pub fn partition<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }
    (values, errors)
}

/// All values, or all errors flattened.
pub fn consolidate_arr<T, E>(
    results: impl IntoIterator<Item = Result<T, Vec<E>>>,
) -> Result<Vec<T>, Vec<E>> {
    let (values, errors) = partition(results);
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors.into_iter().flatten().collect())
    }
}

/// `base` deep-merged with every value in order, or all errors flattened.
pub fn consolidate_obj<E>(
    results: impl IntoIterator<Item = Result<Map<String, Value>, Vec<E>>>,
    base: Map<String, Value>,
) -> Result<Map<String, Value>, Vec<E>> {
    let values = consolidate_arr(results)?;
    Ok(values.into_iter().fold(base, |mut acc, value| {
        deep_merge(&mut acc, value);
        acc
    }))
}

/// Merge `other` into `target`. Objects present on both sides merge key by
/// key; anything else in `other` replaces what `target` had.
pub fn deep_merge(target: &mut Map<String, Value>, other: Map<String, Value>) {
    for (key, value) in other {
        match value {
            Value::Object(incoming) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, incoming),
                _ => {
                    target.insert(key, Value::Object(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}
