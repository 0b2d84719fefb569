use crate::models::LogRecord;

/// Append-only, input-ordered collection of parsed records.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<LogRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter<P>(&self, predicate: P) -> impl Iterator<Item = &LogRecord>
    where
        P: Fn(&LogRecord) -> bool,
    {
        self.records.iter().filter(move |r| predicate(*r))
    }
}

impl FromIterator<LogRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = LogRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
