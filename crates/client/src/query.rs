use chrono::NaiveDate;
use tracing::debug;

use crate::date::{DateResolver, LAYOUT};
use crate::error::Result;

/// Filters as given on the command line, before any resolution.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub name: String,
    pub place: String,
    pub size: String,
    pub page: String,
    pub from: String,
    pub to: String,
}

/// Outbound filter set for `/api/whereis`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub name: Option<String>,
    pub place: Option<String>,
    pub size: String,
    pub page: String,
    pub from: NaiveDate,
    /// `None` leaves the range open-ended.
    pub to: Option<NaiveDate>,
}

impl Query {
    pub fn build(filters: &Filters, dates: &DateResolver) -> Result<Self> {
        let to = match filters.to.trim() {
            "" => None,
            token => Some(dates.resolve(token)?),
        };
        let query = Query {
            name: non_empty(&filters.name),
            place: non_empty(&filters.place),
            size: filters.size.clone(),
            page: filters.page.clone(),
            from: dates.resolve(&filters.from)?,
            to,
        };
        debug!(?query, "built query");
        Ok(query)
    }

    /// Composite pagination token, `<size>/<page>`.
    pub fn limit(&self) -> String {
        format!("{}/{}", self.size, self.page)
    }

    /// Query-string pairs in wire order. Absent filters are left out rather
    /// than sent empty.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(name) = &self.name {
            params.push(("n", name.clone()));
        }
        params.push(("l", self.limit()));
        if let Some(place) = &self.place {
            params.push(("p", place.clone()));
        }
        params.push(("f", self.from.format(LAYOUT).to_string()));
        if let Some(to) = self.to {
            params.push(("t", to.format(LAYOUT).to_string()));
        }
        params
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn dates() -> DateResolver {
        DateResolver::at(NaiveDate::from_ymd_opt(2019, 1, 7).unwrap())
    }

    fn filters() -> Filters {
        Filters {
            size: "20".to_string(),
            page: "1".to_string(),
            ..Filters::default()
        }
    }

    fn keys(query: &Query) -> Vec<&'static str> {
        query.params().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn empty_filters_are_omitted() {
        let query = Query::build(&filters(), &dates()).unwrap();
        assert_eq!(keys(&query), vec!["l", "f"]);
    }

    #[test]
    fn limit_is_size_slash_page() {
        let query = Query::build(&filters(), &dates()).unwrap();
        assert_eq!(query.params()[0], ("l", "20/1".to_string()));
    }

    #[test]
    fn limit_passes_tokens_through() {
        let f = Filters { size: "lots".to_string(), page: "-1".to_string(), ..filters() };
        let query = Query::build(&f, &dates()).unwrap();
        assert_eq!(query.limit(), "lots/-1");
    }

    #[test]
    fn from_defaults_to_today() {
        let query = Query::build(&filters(), &dates()).unwrap();
        assert!(query.params().contains(&("f", "2019-01-07".to_string())));
        assert_eq!(query.to, None);
    }

    #[test]
    fn all_filters_in_wire_order() {
        let f = Filters {
            name: "matt".to_string(),
            place: "Taipei".to_string(),
            from: "20181201".to_string(),
            to: "2018-12-03".to_string(),
            ..filters()
        };
        let query = Query::build(&f, &dates()).unwrap();
        assert_eq!(
            query.params(),
            vec![
                ("n", "matt".to_string()),
                ("l", "20/1".to_string()),
                ("p", "Taipei".to_string()),
                ("f", "2018-12-01".to_string()),
                ("t", "2018-12-03".to_string()),
            ]
        );
    }

    #[test]
    fn relative_to_date() {
        let f = Filters { from: "ytd".to_string(), to: "tmw".to_string(), ..filters() };
        let query = Query::build(&f, &dates()).unwrap();
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2019, 1, 6).unwrap());
        assert_eq!(query.to, NaiveDate::from_ymd_opt(2019, 1, 8));
    }

    #[test]
    fn bad_date_fails_the_build() {
        let f = Filters { to: "whenever".to_string(), ..filters() };
        assert!(matches!(Query::build(&f, &dates()), Err(Error::InvalidDate(_))));
    }
}
