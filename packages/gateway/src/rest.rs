//! PostgREST query strings.
//!
//! The backend exposes each table at `/rest/v1/<table>` and takes filters as
//! query parameters of the form `column=op.value`. [`Query`] builds those
//! parameters in call order.

/// Values PostgREST treats as reserved inside `in.(...)` lists.
const RESERVED: &[char] = &[',', '(', ')', '"', '\\'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    /// `column=in.(a,b,c)`. Values containing reserved characters are quoted.
    pub fn in_list(mut self, column: &str, values: &[String]) -> Self {
        let list = values
            .iter()
            .map(|v| quote_list_value(v))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.into(), format!("in.({list})")));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params
            .push(("order".into(), format!("{column}.{}", order.as_str())));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    /// Parameters for `reqwest::RequestBuilder::query`.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Render as `a=b&c=d` without percent-encoding.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn quote_list_value(value: &str) -> String {
    if value.contains(RESERVED) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_query() {
        let q = Query::new().select("*").order("name", Order::Asc);
        assert_eq!(q.to_query_string(), "select=*&order=name.asc");
    }

    #[test]
    fn test_single_row_query() {
        let q = Query::new().select("*").eq("id", "abc").limit(1);
        assert_eq!(q.to_query_string(), "select=*&id=eq.abc&limit=1");
    }

    #[test]
    fn test_in_list_quotes_reserved_values() {
        let ids = vec!["u1".to_string(), "a,b".to_string(), "say \"hi\"".to_string()];
        let q = Query::new().select("id,full_name").in_list("id", &ids);
        assert_eq!(
            q.params()[1],
            ("id".to_string(), r#"in.(u1,"a,b","say \"hi\"")"#.to_string())
        );
    }

    #[test]
    fn test_newest_first() {
        let q = Query::new().eq("spot_id", "s1").order("created_at", Order::Desc);
        assert_eq!(q.to_query_string(), "spot_id=eq.s1&order=created_at.desc");
    }
}
