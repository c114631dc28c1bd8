//! Duplicate collapse across sources. Key is the lowercased business name;
//! first occurrence wins, order preserved.

use crate::domain::model::ProducerRecord;
use std::collections::HashSet;

pub fn dedupe(records: Vec<ProducerRecord>) -> Vec<ProducerRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut deduplicated = Vec::with_capacity(records.len());

    for record in records {
        if record.name.is_empty() {
            continue;
        }
        if seen.insert(record.name.to_lowercase()) {
            deduplicated.push(record);
        }
    }

    deduplicated
}
