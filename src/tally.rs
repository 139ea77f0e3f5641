use std::collections::HashMap;

use csv::ByteRecord;

use crate::header::Columns;
use crate::record::certified_fields;
use crate::summary::Category;

pub type FrequencyMap = HashMap<String, u64>;

/// Running counts accumulated over a single pass of the input.
#[derive(Debug, Default)]
pub struct Tally {
    pub occupations: FrequencyMap,
    pub states: FrequencyMap,
    pub occupation_total: u64,
    pub state_total: u64,
    pub records_read: u64,
    pub certified: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    fn count(frequencies: &mut FrequencyMap, key: &str) {
        // avoid allocating a key for values already seen
        if let Some(count) = frequencies.get_mut(key) {
            *count += 1;
        } else {
            frequencies.insert(key.to_owned(), 1);
        }
    }

    /// Classify one data record and count it if certified.
    ///
    /// Returns whether the record was certified.
    pub fn process_record(&mut self, record: &ByteRecord, columns: &Columns) -> bool {
        self.records_read += 1;

        let Some(fields) = certified_fields(record, columns) else {
            return false;
        };
        self.certified += 1;

        if let Some(occupation) = fields.occupation {
            Self::count(&mut self.occupations, &occupation);
            self.occupation_total += 1;
        }
        if let Some(state) = fields.state {
            Self::count(&mut self.states, &state);
            self.state_total += 1;
        }
        true
    }

    pub fn frequencies(&self, category: Category) -> &FrequencyMap {
        match category {
            Category::Occupation => &self.occupations,
            Category::State => &self.states,
        }
    }

    pub fn total(&self, category: Category) -> u64 {
        match category {
            Category::Occupation => self.occupation_total,
            Category::State => self.state_total,
        }
    }
}
