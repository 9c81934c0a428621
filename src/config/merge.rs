//! Merge rules: defaults and override order.

pub(crate) mod merge_policy;
