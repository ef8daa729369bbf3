use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Planet {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    pub population: Option<i64>,
    pub rotation_period: Option<i64>,
    pub orbital_period: Option<i64>,
    pub diameter: Option<i64>,
    pub gravity: Option<String>,
    pub terrain: Option<String>,
    pub surface: Option<String>,
    pub climate: Option<String>,
}

impl Planet {
    pub fn named(name: &str) -> Self {
        Planet {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}
