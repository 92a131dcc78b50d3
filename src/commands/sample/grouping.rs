use super::*;

/// Texts of one partition grouped by author.
///
/// Authors iterate in ascending id order regardless of input order, so the
/// candidate author list derived from a grouping is reproducible. Texts keep
/// their relative input order inside each group. Groups only exist for
/// authors that own at least one text, so sampling from any group is safe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorGroups {
    groups: BTreeMap<AuthorId, Vec<LabeledText>>,
}

impl AuthorGroups {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LabeledText>,
    {
        let mut groups = BTreeMap::<AuthorId, Vec<LabeledText>>::new();
        for record in records {
            groups.entry(record.label).or_default().push(record.clone());
        }
        Self { groups }
    }

    pub fn authors(&self) -> Vec<AuthorId> {
        self.groups.keys().copied().collect()
    }

    pub fn get(&self, author: AuthorId) -> Option<&[LabeledText]> {
        self.groups.get(&author).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AuthorId, &[LabeledText])> {
        self.groups
            .iter()
            .map(|(author, texts)| (*author, texts.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_texts(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
