//! Flat string encoding of a [`Product`] for one cache hash entry.
//!
//! Integers are decimal text, booleans `True`/`False`, timestamps RFC 3339
//! in UTC with microseconds, strings verbatim.

use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use product_errors::CodecError;
use product_models::Product;

pub fn encode_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

pub fn encode_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn encode(product: &Product) -> Vec<(String, String)> {
    let fields: [(&str, String); 16] = [
        ("id", product.id.to_string()),
        ("category_id", product.category_id.to_string()),
        ("brand_id", product.brand_id.to_string()),
        ("author_id", product.author_id.to_string()),
        ("name", product.name.clone()),
        ("model_name", product.model_name.clone()),
        ("search_string", product.search_string.clone()),
        ("price", product.price.to_string()),
        ("num_product", product.num_product.to_string()),
        ("discount", product.discount.to_string()),
        ("image_link", product.image_link.clone()),
        ("is_super", encode_bool(product.is_super).to_owned()),
        ("is_new", encode_bool(product.is_new).to_owned()),
        ("is_active", encode_bool(product.is_active).to_owned()),
        ("date_created", encode_timestamp(&product.date_created)),
        ("updated_at", encode_timestamp(&product.updated_at)),
    ];

    fields
        .into_iter()
        .map(|(field, value)| (field.to_owned(), value))
        .collect()
}

struct Fields<'a>(&'a HashMap<String, String>);

impl Fields<'_> {
    fn raw(&self, field: &'static str) -> Result<&str, CodecError> {
        self.0
            .get(field)
            .map(String::as_str)
            .ok_or(CodecError::MissingField(field))
    }

    fn text(&self, field: &'static str) -> Result<String, CodecError> {
        self.raw(field).map(str::to_owned)
    }

    fn parse<T: FromStr>(&self, field: &'static str) -> Result<T, CodecError> {
        let raw = self.raw(field)?;
        raw.parse().map_err(|_| invalid(field, raw))
    }

    fn flag(&self, field: &'static str) -> Result<bool, CodecError> {
        match self.raw(field)? {
            "True" => Ok(true),
            "False" => Ok(false),
            other => Err(invalid(field, other)),
        }
    }

    fn timestamp(
        &self, field: &'static str,
    ) -> Result<DateTime<Utc>, CodecError> {
        let raw = self.raw(field)?;
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|_| invalid(field, raw))
    }
}

fn invalid(field: &'static str, value: &str) -> CodecError {
    CodecError::InvalidValue {
        field,
        value: value.to_owned(),
    }
}

pub fn decode(fields: &HashMap<String, String>) -> Result<Product, CodecError> {
    let f = Fields(fields);

    Ok(Product {
        id: f.parse("id")?,
        category_id: f.parse("category_id")?,
        brand_id: f.parse("brand_id")?,
        author_id: f.parse("author_id")?,
        name: f.text("name")?,
        model_name: f.text("model_name")?,
        search_string: f.text("search_string")?,
        price: f.parse("price")?,
        num_product: f.parse("num_product")?,
        discount: f.parse("discount")?,
        image_link: f.text("image_link")?,
        is_super: f.flag("is_super")?,
        is_new: f.flag("is_new")?,
        is_active: f.flag("is_active")?,
        date_created: f.timestamp("date_created")?,
        updated_at: f.timestamp("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    fn product() -> Product {
        Product {
            id: 42,
            category_id: 10,
            brand_id: 3,
            author_id: 7,
            name: "Espresso machine".into(),
            model_name: "EM-9".into(),
            search_string: "espresso coffee 15 bar".into(),
            price: 129_900,
            num_product: 4,
            discount: 15,
            image_link: "https://img.example.com/em9.png".into(),
            is_super: true,
            is_new: false,
            is_active: true,
            date_created: Utc
                .with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
                .unwrap()
                .with_nanosecond(123_456_000)
                .unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
        }
    }

    fn as_map(fields: Vec<(String, String)>) -> HashMap<String, String> {
        fields.into_iter().collect()
    }

    #[test]
    fn encodes_textual_formats() {
        let map = as_map(encode(&product()));

        assert_eq!(map.len(), 16);
        assert_eq!(map["price"], "129900");
        assert_eq!(map["is_super"], "True");
        assert_eq!(map["is_new"], "False");
        assert_eq!(map["date_created"], "2024-05-01T08:00:00.123456Z");
        assert_eq!(map["updated_at"], "2024-05-02T09:30:00.000000Z");
    }

    #[test]
    fn decode_restores_typed_product() {
        let original = product();
        let map = as_map(encode(&original));

        let decoded = decode(&map).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(as_map(encode(&decoded)), map);
    }

    #[test]
    fn missing_field_is_reported() {
        let mut map = as_map(encode(&product()));
        map.remove("brand_id");

        assert_eq!(decode(&map), Err(CodecError::MissingField("brand_id")));
    }

    #[test]
    fn bad_literals_are_rejected() {
        let mut map = as_map(encode(&product()));
        map.insert("is_new".into(), "true".into());
        assert!(matches!(
            decode(&map),
            Err(CodecError::InvalidValue { field: "is_new", .. })
        ));

        let mut map = as_map(encode(&product()));
        map.insert("price".into(), "12.50".into());
        assert!(matches!(
            decode(&map),
            Err(CodecError::InvalidValue { field: "price", .. })
        ));
    }
}
