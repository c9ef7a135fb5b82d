// ── List options ──
//
// Each resource kind has its own filter set on top of the shared paging
// options. Rendering is deterministic and omits every unset, zero or empty
// value: omission, not an empty string, is what means "no filter".

use crate::model::{ActionStatus, VolumeStatus};

/// Query pairs in render order. Keys may repeat.
pub type Query = Vec<(&'static str, String)>;

/// Paging and label filtering accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub label_selector: Option<String>,
}

impl ListOpts {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn per_page(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            ..Self::default()
        }
    }

    fn render(&self, query: &mut Query) {
        push_number(query, "page", self.page);
        push_number(query, "per_page", self.per_page);
        push_str(query, "label_selector", self.label_selector.as_deref());
    }
}

/// Options that render into a list query.
pub trait ListQuery: Clone + Default + Send + Sync {
    fn list_opts(&self) -> &ListOpts;

    fn list_opts_mut(&mut self) -> &mut ListOpts;

    fn query(&self) -> Query;
}

fn push_number(query: &mut Query, key: &'static str, value: Option<u32>) {
    if let Some(value) = value.filter(|v| *v > 0) {
        query.push((key, value.to_string()));
    }
}

fn push_str(query: &mut Query, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        query.push((key, value.to_owned()));
    }
}

fn push_all<T: ToString>(query: &mut Query, key: &'static str, values: &[T]) {
    query.extend(
        values
            .iter()
            .map(ToString::to_string)
            .filter(|v| !v.is_empty())
            .map(|v| (key, v)),
    );
}

// ── Per-kind options ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirewallListOpts {
    pub list: ListOpts,
    pub name: Option<String>,
    pub sort: Vec<String>,
}

impl ListQuery for FirewallListOpts {
    fn list_opts(&self) -> &ListOpts {
        &self.list
    }

    fn list_opts_mut(&mut self) -> &mut ListOpts {
        &mut self.list
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        self.list.render(&mut query);
        push_str(&mut query, "name", self.name.as_deref());
        push_all(&mut query, "sort", &self.sort);
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeListOpts {
    pub list: ListOpts,
    pub name: Option<String>,
    pub status: Vec<VolumeStatus>,
    pub sort: Vec<String>,
}

impl ListQuery for VolumeListOpts {
    fn list_opts(&self) -> &ListOpts {
        &self.list
    }

    fn list_opts_mut(&mut self) -> &mut ListOpts {
        &mut self.list
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        self.list.render(&mut query);
        push_str(&mut query, "name", self.name.as_deref());
        push_all(&mut query, "status", &self.status);
        push_all(&mut query, "sort", &self.sort);
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryIpListOpts {
    pub list: ListOpts,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub sort: Vec<String>,
}

impl ListQuery for PrimaryIpListOpts {
    fn list_opts(&self) -> &ListOpts {
        &self.list
    }

    fn list_opts_mut(&mut self) -> &mut ListOpts {
        &mut self.list
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        self.list.render(&mut query);
        push_str(&mut query, "name", self.name.as_deref());
        push_str(&mut query, "ip", self.ip.as_deref());
        push_all(&mut query, "sort", &self.sort);
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionListOpts {
    pub list: ListOpts,
    pub id: Vec<i64>,
    pub status: Vec<ActionStatus>,
    pub sort: Vec<String>,
}

impl ListQuery for ActionListOpts {
    fn list_opts(&self) -> &ListOpts {
        &self.list
    }

    fn list_opts_mut(&mut self) -> &mut ListOpts {
        &mut self.list
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        self.list.render(&mut query);
        push_all(&mut query, "id", &self.id);
        push_all(&mut query, "status", &self.status);
        push_all(&mut query, "sort", &self.sort);
        query
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pairs(query: &Query) -> Vec<(&str, &str)> {
        query.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    #[test]
    fn default_opts_render_nothing() {
        assert!(FirewallListOpts::default().query().is_empty());
        assert!(VolumeListOpts::default().query().is_empty());
        assert!(PrimaryIpListOpts::default().query().is_empty());
        assert!(ActionListOpts::default().query().is_empty());
    }

    #[test]
    fn zero_and_empty_values_are_omitted() {
        let opts = FirewallListOpts {
            list: ListOpts {
                page: Some(0),
                per_page: Some(0),
                label_selector: Some(String::new()),
            },
            name: Some(String::new()),
            sort: vec![String::new()],
        };
        assert!(opts.query().is_empty());
    }

    #[test]
    fn repeatable_filters_render_in_order() {
        let opts = VolumeListOpts {
            list: ListOpts {
                page: Some(2),
                per_page: Some(50),
                label_selector: Some("env=prod".into()),
            },
            name: Some("data".into()),
            status: vec![VolumeStatus::Creating, VolumeStatus::Available],
            sort: vec!["id:asc".into(), "name:desc".into()],
        };
        assert_eq!(
            pairs(&opts.query()),
            vec![
                ("page", "2"),
                ("per_page", "50"),
                ("label_selector", "env=prod"),
                ("name", "data"),
                ("status", "creating"),
                ("status", "available"),
                ("sort", "id:asc"),
                ("sort", "name:desc"),
            ]
        );
    }

    #[test]
    fn action_filters_render_ids_and_status() {
        let opts = ActionListOpts {
            id: vec![1, 2],
            status: vec![ActionStatus::Running],
            ..ActionListOpts::default()
        };
        assert_eq!(
            pairs(&opts.query()),
            vec![("id", "1"), ("id", "2"), ("status", "running")]
        );
    }

    #[test]
    fn primary_ip_filters_by_address() {
        let opts = PrimaryIpListOpts {
            ip: Some("131.232.99.1".into()),
            ..PrimaryIpListOpts::default()
        };
        assert_eq!(pairs(&opts.query()), vec![("ip", "131.232.99.1")]);
    }
}
