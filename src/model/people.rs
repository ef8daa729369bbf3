use serde::Serialize;

/// A character record. `name` travels as `nombre` on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct People {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub species: Option<String>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub gender: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub homeworld: Option<String>,
}

impl People {
    pub fn named(name: &str) -> Self {
        People {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}
