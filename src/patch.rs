//! Partial updates for people and planets: which body fields are applied, and how.

use crate::error::{AppError, ConfigError};
use crate::model::{People, Planet};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Decides whether a field in an update body is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Apply only present and truthy fields. `0`, `""`, `false` and `null` are skipped.
    #[default]
    Truthy,
    /// Apply every present field. `null` clears the stored value.
    Presence,
}

impl FromStr for UpdatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truthy" => Ok(UpdatePolicy::Truthy),
            "presence" => Ok(UpdatePolicy::Presence),
            _ => Err(ConfigError::UnknownUpdatePolicy(s.to_string())),
        }
    }
}

pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Parse a raw request body as a JSON object. An empty body is an empty object.
pub fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// `None` leaves the stored value alone; `Some(None)` clears it.
type Change<T> = Option<Option<T>>;

fn pick<'a>(body: &'a Map<String, Value>, key: &str, policy: UpdatePolicy) -> Option<&'a Value> {
    let v = body.get(key)?;
    match policy {
        UpdatePolicy::Truthy => is_truthy(v).then_some(v),
        UpdatePolicy::Presence => Some(v),
    }
}

fn text(body: &Map<String, Value>, key: &str, policy: UpdatePolicy) -> Result<Change<String>, AppError> {
    let Some(v) = pick(body, key, policy) else {
        return Ok(None);
    };
    match v {
        Value::Null => Ok(Some(None)),
        Value::String(s) => Ok(Some(Some(s.clone()))),
        Value::Number(n) => Ok(Some(Some(n.to_string()))),
        _ => Err(AppError::BadRequest(format!("{} must be a string", key))),
    }
}

fn integer(body: &Map<String, Value>, key: &str, policy: UpdatePolicy) -> Result<Change<i64>, AppError> {
    let Some(v) = pick(body, key, policy) else {
        return Ok(None);
    };
    let parsed = match v {
        Value::Null => return Ok(Some(None)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed
        .map(|n| Some(Some(n)))
        .ok_or_else(|| AppError::BadRequest(format!("{} must be an integer", key)))
}

/// `172.0` is accepted as 172; `172.5` is not.
fn whole(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn assign<T: PartialEq>(slot: &mut Option<T>, change: Change<T>) -> bool {
    match change {
        Some(v) if *slot != v => {
            *slot = v;
            true
        }
        _ => false,
    }
}

/// Recognized fields of `PUT /people/{id}`.
#[derive(Debug, Default)]
pub struct PeopleChanges {
    name: Change<String>,
    birth_year: Change<String>,
    species: Change<String>,
    height: Change<i64>,
    mass: Change<i64>,
    gender: Change<String>,
    hair_color: Change<String>,
    skin_color: Change<String>,
    homeworld: Change<String>,
}

impl PeopleChanges {
    pub fn from_body(body: &Map<String, Value>, policy: UpdatePolicy) -> Result<Self, AppError> {
        Ok(PeopleChanges {
            name: text(body, "nombre", policy)?,
            birth_year: text(body, "birth_year", policy)?,
            species: text(body, "species", policy)?,
            height: integer(body, "height", policy)?,
            mass: integer(body, "mass", policy)?,
            gender: text(body, "gender", policy)?,
            hair_color: text(body, "hair_color", policy)?,
            skin_color: text(body, "skin_color", policy)?,
            homeworld: text(body, "homeworld", policy)?,
        })
    }

    /// Returns true if any stored value changed.
    pub fn apply(self, p: &mut People) -> bool {
        let mut changed = false;
        changed |= assign(&mut p.name, self.name);
        changed |= assign(&mut p.birth_year, self.birth_year);
        changed |= assign(&mut p.species, self.species);
        changed |= assign(&mut p.height, self.height);
        changed |= assign(&mut p.mass, self.mass);
        changed |= assign(&mut p.gender, self.gender);
        changed |= assign(&mut p.hair_color, self.hair_color);
        changed |= assign(&mut p.skin_color, self.skin_color);
        changed |= assign(&mut p.homeworld, self.homeworld);
        changed
    }
}

/// Recognized fields of `PUT /planet/{id}`.
#[derive(Debug, Default)]
pub struct PlanetChanges {
    name: Change<String>,
    population: Change<i64>,
    rotation_period: Change<i64>,
    orbital_period: Change<i64>,
    diameter: Change<i64>,
    gravity: Change<String>,
    terrain: Change<String>,
    surface: Change<String>,
    climate: Change<String>,
}

impl PlanetChanges {
    pub fn from_body(body: &Map<String, Value>, policy: UpdatePolicy) -> Result<Self, AppError> {
        Ok(PlanetChanges {
            name: text(body, "nombre", policy)?,
            population: integer(body, "population", policy)?,
            rotation_period: integer(body, "rotation_period", policy)?,
            orbital_period: integer(body, "orbital_period", policy)?,
            diameter: integer(body, "diameter", policy)?,
            gravity: text(body, "gravity", policy)?,
            terrain: text(body, "terrain", policy)?,
            surface: text(body, "surface", policy)?,
            climate: text(body, "climate", policy)?,
        })
    }

    pub fn apply(self, p: &mut Planet) -> bool {
        let mut changed = false;
        changed |= assign(&mut p.name, self.name);
        changed |= assign(&mut p.population, self.population);
        changed |= assign(&mut p.rotation_period, self.rotation_period);
        changed |= assign(&mut p.orbital_period, self.orbital_period);
        changed |= assign(&mut p.diameter, self.diameter);
        changed |= assign(&mut p.gravity, self.gravity);
        changed |= assign(&mut p.terrain, self.terrain);
        changed |= assign(&mut p.surface, self.surface);
        changed |= assign(&mut p.climate, self.climate);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn tatooine() -> Planet {
        Planet {
            id: 1,
            population: Some(200_000),
            climate: Some("arid".into()),
            ..Planet::named("Tatooine")
        }
    }

    #[test]
    fn truthiness_follows_json_falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-2.5), json!("0"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn truthy_policy_ignores_zero_population() {
        let mut planet = tatooine();
        let changes = PlanetChanges::from_body(&obj(json!({"population": 0})), UpdatePolicy::Truthy).unwrap();
        assert!(!changes.apply(&mut planet));
        assert_eq!(planet.population, Some(200_000));
    }

    #[test]
    fn truthy_policy_ignores_empty_name_and_null() {
        let mut planet = tatooine();
        let body = obj(json!({"nombre": "", "climate": null}));
        let changes = PlanetChanges::from_body(&body, UpdatePolicy::Truthy).unwrap();
        assert!(!changes.apply(&mut planet));
        assert_eq!(planet, tatooine());
    }

    #[test]
    fn presence_policy_writes_zero_and_clears_null() {
        let mut planet = tatooine();
        let body = obj(json!({"population": 0, "climate": null}));
        let changes = PlanetChanges::from_body(&body, UpdatePolicy::Presence).unwrap();
        assert!(changes.apply(&mut planet));
        assert_eq!(planet.population, Some(0));
        assert_eq!(planet.climate, None);
        assert_eq!(planet.name.as_deref(), Some("Tatooine"));
    }

    #[test]
    fn only_recognized_fields_are_applied() {
        let mut person = People {
            id: 3,
            ..People::named("Leia Organa")
        };
        let body = obj(json!({"id": 99, "gender": "female", "lightsaber": "none", "height": "150"}));
        let changes = PeopleChanges::from_body(&body, UpdatePolicy::Truthy).unwrap();
        assert!(changes.apply(&mut person));
        assert_eq!(person.id, 3);
        assert_eq!(person.gender.as_deref(), Some("female"));
        assert_eq!(person.height, Some(150));
    }

    #[test]
    fn same_value_is_not_a_change() {
        let mut planet = tatooine();
        let body = obj(json!({"nombre": "Tatooine", "climate": "arid"}));
        let changes = PlanetChanges::from_body(&body, UpdatePolicy::Truthy).unwrap();
        assert!(!changes.apply(&mut planet));
    }

    #[test]
    fn wrong_types_are_bad_requests() {
        let err = PlanetChanges::from_body(&obj(json!({"diameter": "huge"})), UpdatePolicy::Truthy).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let err = PeopleChanges::from_body(&obj(json!({"species": ["Human"]})), UpdatePolicy::Truthy).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let err = PeopleChanges::from_body(&obj(json!({"height": 172.5})), UpdatePolicy::Truthy).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn numbers_convert_when_exact() {
        let mut person = People::named("Luke Skywalker");
        let body = obj(json!({"birth_year": 19, "height": 172.0, "mass": 77}));
        let changes = PeopleChanges::from_body(&body, UpdatePolicy::Truthy).unwrap();
        assert!(changes.apply(&mut person));
        assert_eq!(person.birth_year.as_deref(), Some("19"));
        assert_eq!(person.height, Some(172));
        assert_eq!(person.mass, Some(77));
    }

    #[test]
    fn empty_body_parses_to_empty_object() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b"  \n").unwrap().is_empty());
        assert!(parse_body(b"{}").unwrap().is_empty());
        assert!(matches!(parse_body(b"[1,2]"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_body(b"{nope"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Presence".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Presence);
        assert_eq!("TRUTHY".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Truthy);
        assert!(matches!(
            "sometimes".parse::<UpdatePolicy>(),
            Err(ConfigError::UnknownUpdatePolicy(v)) if v == "sometimes"
        ));
    }
}
