use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub position: usize,
    pub name: String,
    pub value: i64,
}

impl RankedEntry {
    pub fn position_label(&self) -> String {
        format!("{}º", self.position)
    }
}

/// Competition ranking ("1224") of `values`, highest first.
///
/// `None` and zero values are left out. Ties share a position and the next
/// distinct value takes its 1-based index. `top_n` is a hard count cutoff.
pub fn rank<'a, I>(values: I, top_n: Option<usize>) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (&'a str, Option<i64>)>,
{
    let mut rows: Vec<(&str, i64)> = values
        .into_iter()
        .filter_map(|(name, value)| value.filter(|v| *v != 0).map(|v| (name, v)))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let limit = top_n.unwrap_or(rows.len());
    let mut out = Vec::with_capacity(limit.min(rows.len()));
    let mut last: Option<(i64, usize)> = None;
    for (idx, (name, value)) in rows.into_iter().enumerate() {
        if out.len() >= limit {
            break;
        }
        let position = match last {
            Some((prev, pos)) if prev == value => pos,
            _ => idx + 1,
        };
        last = Some((value, position));
        out.push(RankedEntry {
            position,
            name: name.to_string(),
            value,
        });
    }
    out
}

pub fn rank_map(values: &BTreeMap<String, i64>, top_n: Option<usize>) -> Vec<RankedEntry> {
    rank(values.iter().map(|(n, v)| (n.as_str(), Some(*v))), top_n)
}
