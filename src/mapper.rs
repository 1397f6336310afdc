use crate::catalog::{section_for_category, view_key_for_name};
use crate::models::{Kpi, KpiMeta};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-category value and metadata maps keyed by view key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMaps {
    pub values: BTreeMap<String, f64>,
    pub meta: BTreeMap<String, KpiMeta>,
}

impl CategoryMaps {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Maps the KPIs of a dashboard category onto their view keys.
///
/// Unknown categories and KPIs without a view key are dropped silently. When
/// two KPIs share a view key the later one in `kpis` wins.
pub fn map_category(category: &str, kpis: &[Kpi]) -> CategoryMaps {
    let Some(section) = section_for_category(category) else {
        return CategoryMaps::default();
    };

    let mut maps = CategoryMaps::default();
    for (key, kpi) in matched(section, kpis) {
        maps.values.insert(key.to_string(), kpi.value);
        maps.meta.insert(
            key.to_string(),
            KpiMeta {
                description: kpi.description.clone(),
                unit: kpi.unit,
            },
        );
    }
    maps
}

/// View keys that more than one KPI of the category resolves to.
pub fn duplicate_view_keys(category: &str, kpis: &[Kpi]) -> Vec<&'static str> {
    let Some(section) = section_for_category(category) else {
        return Vec::new();
    };

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for (key, _) in matched(section, kpis) {
        if !seen.insert(key) {
            duplicates.insert(key);
        }
    }
    duplicates.into_iter().collect()
}

fn matched<'a>(section: &'a str, kpis: &'a [Kpi]) -> impl Iterator<Item = (&'static str, &'a Kpi)> + 'a {
    kpis.iter()
        .filter(move |kpi| kpi.section == section)
        .filter_map(|kpi| view_key_for_name(&kpi.name).map(|key| (key, kpi)))
}
