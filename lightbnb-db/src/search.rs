//! Property search query builder
//!
//! Turns a [`PropertyFilter`] into one parameterized statement:
//!
//! ```text
//! SELECT properties.*, avg(rating) AS average_ratings
//! FROM properties LEFT JOIN property_reviews ...
//! [WHERE city LIKE $a AND cost BETWEEN $b/$c AND owner_id = $d]
//! GROUP BY properties.id
//! [HAVING avg(rating) >= $e]
//! ORDER BY cost_per_night LIMIT $last
//! ```
//!
//! The statement is accumulated once as a list of segments, each a piece of
//! SQL text optionally followed by one bound value. Rendering pushes the text
//! and binds the value through `sqlx::QueryBuilder::push_bind`, and the
//! parameter list is read back from the same segments, so placeholder numbers
//! always match bind positions no matter which filters are present.

use sqlx::{Postgres, QueryBuilder};

use crate::models::{Limit, PropertyFilter};

const SELECT_PROPERTIES: &str = "SELECT properties.*, \
     avg(property_reviews.rating)::float8 AS average_ratings \
     FROM properties \
     LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// A value bound to the search statement, in bind order.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParam {
    Text(String),
    Int(i32),
    Float(f64),
    BigInt(i64),
}

impl SearchParam {
    fn bind_to(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Self::Text(value) => {
                qb.push_bind(value.clone());
            }
            Self::Int(value) => {
                qb.push_bind(*value);
            }
            Self::Float(value) => {
                qb.push_bind(*value);
            }
            Self::BigInt(value) => {
                qb.push_bind(*value);
            }
        }
    }
}

/// SQL text, followed by its bound value when it has one.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    sql: &'static str,
    param: Option<SearchParam>,
}

impl Segment {
    fn text(sql: &'static str) -> Self {
        Self { sql, param: None }
    }

    fn bound(sql: &'static str, param: SearchParam) -> Self {
        Self {
            sql,
            param: Some(param),
        }
    }
}

/// Escape LIKE metacharacters so the input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Typed property search: the accumulated statement and its row cap.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySearch {
    segments: Vec<Segment>,
    limit: Limit,
}

impl PropertySearch {
    /// Collect the active filters in evaluation order:
    /// city, price range, owner, then the rating floor, then the limit.
    ///
    /// A `minimum_rating` of `Some(0.0)` still emits the HAVING clause, which
    /// drops properties without reviews (their average is NULL). Use `None`
    /// to include them.
    pub fn new(filter: &PropertyFilter, limit: Limit) -> Self {
        let mut conditions: Vec<Vec<Segment>> = Vec::new();

        if let Some(city) = filter.city_term() {
            let pattern = format!("%{}%", escape_like(city));
            conditions.push(vec![Segment::bound(
                "properties.city LIKE ",
                SearchParam::Text(pattern),
            )]);
        }
        if let Some((min, max)) = filter.price_range() {
            conditions.push(vec![
                Segment::bound("properties.cost_per_night >= ", SearchParam::Int(min)),
                Segment::bound(
                    " AND properties.cost_per_night <= ",
                    SearchParam::Int(max),
                ),
            ]);
        }
        if let Some(owner_id) = filter.owner_id {
            conditions.push(vec![Segment::bound(
                "properties.owner_id = ",
                SearchParam::Int(owner_id),
            )]);
        }

        let mut segments = vec![Segment::text(SELECT_PROPERTIES)];
        for (i, condition) in conditions.into_iter().enumerate() {
            segments.push(Segment::text(if i == 0 { " WHERE " } else { " AND " }));
            segments.extend(condition);
        }

        segments.push(Segment::text(" GROUP BY properties.id"));

        if let Some(rating) = filter.minimum_rating {
            segments.push(Segment::bound(
                " HAVING avg(property_reviews.rating)::float8 >= ",
                SearchParam::Float(rating),
            ));
        }

        segments.push(Segment::bound(
            " ORDER BY properties.cost_per_night, properties.id LIMIT ",
            SearchParam::BigInt(limit.as_i64()),
        ));

        Self { segments, limit }
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    /// Render the statement with its bound values.
    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("");
        for segment in &self.segments {
            qb.push(segment.sql);
            if let Some(param) = &segment.param {
                param.bind_to(&mut qb);
            }
        }
        qb
    }

    /// Values in the order [`build`](Self::build) binds them. The limit is always last.
    pub fn params(&self) -> Vec<SearchParam> {
        self.segments
            .iter()
            .filter_map(|segment| segment.param.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(filter: &PropertyFilter, limit: Limit) -> String {
        PropertySearch::new(filter, limit).build().sql().to_owned()
    }

    #[test]
    fn no_filters() {
        let search = PropertySearch::new(&PropertyFilter::default(), Limit::default());
        assert_eq!(
            search.build().sql(),
            "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_ratings \
             FROM properties \
             LEFT JOIN property_reviews ON properties.id = property_reviews.property_id \
             GROUP BY properties.id \
             ORDER BY properties.cost_per_night, properties.id LIMIT $1"
        );
        assert_eq!(search.params(), vec![SearchParam::BigInt(10)]);
    }

    #[test]
    fn every_filter_in_fixed_order() {
        let filter = PropertyFilter::default()
            .minimum_rating(4.0)
            .owner(3)
            .price_between(100, 500)
            .city("Vancouver");
        let search = PropertySearch::new(&filter, Limit::new(5));

        let rendered = search.build().sql().to_owned();
        assert!(rendered.ends_with(
            " WHERE properties.city LIKE $1 \
             AND properties.cost_per_night >= $2 AND properties.cost_per_night <= $3 \
             AND properties.owner_id = $4 \
             GROUP BY properties.id \
             HAVING avg(property_reviews.rating)::float8 >= $5 \
             ORDER BY properties.cost_per_night, properties.id LIMIT $6"
        ));
        assert_eq!(
            search.params(),
            vec![
                SearchParam::Text("%Vancouver%".into()),
                SearchParam::Int(100),
                SearchParam::Int(500),
                SearchParam::Int(3),
                SearchParam::Float(4.0),
                SearchParam::BigInt(5),
            ]
        );
    }

    #[test]
    fn each_bound_value_follows_its_clause() {
        let filter = PropertyFilter::default().price_between(100, 500).owner(3);
        let search = PropertySearch::new(&filter, Limit::default());

        let bound: Vec<(&str, SearchParam)> = search
            .segments
            .iter()
            .filter_map(|s| s.param.clone().map(|p| (s.sql, p)))
            .collect();
        assert_eq!(
            bound,
            vec![
                ("properties.cost_per_night >= ", SearchParam::Int(100)),
                (" AND properties.cost_per_night <= ", SearchParam::Int(500)),
                ("properties.owner_id = ", SearchParam::Int(3)),
                (
                    " ORDER BY properties.cost_per_night, properties.id LIMIT ",
                    SearchParam::BigInt(10)
                ),
            ]
        );
    }

    #[test]
    fn one_price_bound_is_ignored() {
        let filter = PropertyFilter {
            minimum_price_per_night: Some(200),
            ..Default::default()
        };
        let rendered = sql(&filter, Limit::default());
        assert!(!rendered.contains("cost_per_night >="));
        assert!(!rendered.contains("WHERE"));
        assert_eq!(
            PropertySearch::new(&filter, Limit::default()).params(),
            vec![SearchParam::BigInt(10)]
        );
    }

    #[test]
    fn owner_without_city_starts_where() {
        let rendered = sql(&PropertyFilter::default().owner(9), Limit::default());
        assert!(rendered.contains(" WHERE properties.owner_id = $1 GROUP BY"));
        assert!(rendered.ends_with("LIMIT $2"));
    }

    #[test]
    fn rating_goes_after_group_by() {
        let rendered = sql(&PropertyFilter::default().minimum_rating(3.5), Limit::default());
        let group = rendered.find("GROUP BY").unwrap();
        let having = rendered.find("HAVING").unwrap();
        assert!(group < having);
        assert!(!rendered.contains("WHERE"));
    }

    #[test]
    fn zero_rating_still_filters() {
        let filter = PropertyFilter::default().minimum_rating(0.0);
        let search = PropertySearch::new(&filter, Limit::default());
        assert!(search.build().sql().contains("HAVING"));
        assert_eq!(search.params()[0], SearchParam::Float(0.0));
    }

    #[test]
    fn city_metacharacters_escaped() {
        assert_eq!(escape_like("100%_real\\"), "100\\%\\_real\\\\");
        let search = PropertySearch::new(&PropertyFilter::default().city("a_b"), Limit::default());
        assert_eq!(search.params()[0], SearchParam::Text("%a\\_b%".into()));
    }

    #[test]
    fn limit_is_last() {
        let search = PropertySearch::new(&PropertyFilter::default().city("X"), Limit::new(3));
        assert_eq!(search.params().last(), Some(&SearchParam::BigInt(3)));
        assert_eq!(search.limit(), Limit::new(3));
    }

    #[test]
    fn caller_limit_bound_unchanged() {
        for n in [0, 1, 250, u32::MAX] {
            let search = PropertySearch::new(&PropertyFilter::default(), Limit::new(n));
            assert_eq!(
                search.params().last(),
                Some(&SearchParam::BigInt(i64::from(n)))
            );
        }
    }
}
