use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Name of a remote procedure as registered on a router.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcedureId(Arc<str>);

impl ProcedureId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcedureId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for ProcedureId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<Arc<str>> for ProcedureId {
    fn from(value: Arc<str>) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ProcedureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for ProcedureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_compare_by_content() {
        let a = ProcedureId::from("echo");
        let b = ProcedureId::from(String::from("echo"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "echo");
        assert_eq!(a.to_string(), "echo");
    }

    #[rstest]
    fn ids_borrow_as_str_for_map_lookups() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(ProcedureId::from("version"), 1u8);
        assert_eq!(map.get("version"), Some(&1));
    }
}
