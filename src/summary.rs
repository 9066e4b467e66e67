use std::collections::HashMap;
use crate::data::{Count, Key, Record};

/// Count records per container and remote endpoint. Counts come out in
/// the order their key was first seen.
pub fn summarize(records: &[Record]) -> Vec<Count> {
    let mut index  = HashMap::<Key, usize>::new();
    let mut counts = Vec::<Count>::new();

    for record in records {
        let key = record.key();
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None     => {
                index.insert(key.clone(), counts.len());
                counts.push(Count { key, count: 1 });
            }
        }
    }

    counts
}
