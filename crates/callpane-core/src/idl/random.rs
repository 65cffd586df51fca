//! Random valid values for the "Lucky" fill

use rand::distributions::Alphanumeric;
use rand::Rng;

use super::types::IdlType;
use super::value::IdlValue;
use crate::error::{Error, Result};

/// Nesting depth past which options are `null` and vectors are empty
const MAX_DEPTH: usize = 6;

/// Bounds for generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomConfig {
    pub max_vec_len: usize,
    pub max_text_len: usize,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            max_vec_len: 3,
            max_text_len: 8,
        }
    }
}

/// Generate a random value of the given type
///
/// Numbers stay small (naturals up to 1000, integers within ±1000, clamped to
/// the type's range) so the filled form stays readable.
pub fn random_value<R: Rng + ?Sized>(ty: &IdlType, rng: &mut R, cfg: &RandomConfig) -> Result<IdlValue> {
    generate(ty, rng, cfg, 0)
}

fn generate<R: Rng + ?Sized>(
    ty: &IdlType,
    rng: &mut R,
    cfg: &RandomConfig,
    depth: usize,
) -> Result<IdlValue> {
    Ok(match ty {
        IdlType::Null => IdlValue::Null,
        IdlType::Reserved => IdlValue::Reserved,
        IdlType::Bool => IdlValue::Bool(rng.gen_bool(0.5)),
        ty if ty.is_nat() => IdlValue::Nat(rng.gen_range(0..=ty.nat_max().min(1000))),
        ty if ty.is_int() => {
            let (min, max) = ty.int_bounds();
            IdlValue::Int(rng.gen_range(min.max(-1000)..=max.min(1000)))
        }
        ty if ty.is_float() => {
            let x: f64 = rng.gen_range(-1000.0..1000.0);
            IdlValue::Float((x * 1000.0).round() / 1000.0)
        }
        IdlType::Text => {
            let len = rng.gen_range(1..=cfg.max_text_len.max(1));
            IdlValue::Text(
                (0..len)
                    .map(|_| rng.sample(Alphanumeric) as char)
                    .collect(),
            )
        }
        IdlType::Opt(inner) => {
            if depth >= MAX_DEPTH || rng.gen_bool(0.5) {
                IdlValue::none()
            } else {
                IdlValue::some(generate(inner, rng, cfg, depth + 1)?)
            }
        }
        IdlType::Vec(inner) => {
            let len = if depth >= MAX_DEPTH {
                0
            } else {
                rng.gen_range(0..=cfg.max_vec_len)
            };
            IdlValue::Vec(
                (0..len)
                    .map(|_| generate(inner, rng, cfg, depth + 1))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        IdlType::Record(fields) => IdlValue::Record(
            fields
                .iter()
                .map(|f| Ok((f.label.clone(), generate(&f.ty, rng, cfg, depth + 1)?)))
                .collect::<Result<Vec<_>>>()?,
        ),
        IdlType::Variant(arms) => {
            if arms.is_empty() {
                return Err(Error::interface("cannot generate a value of an empty variant"));
            }
            let arm = &arms[rng.gen_range(0..arms.len())];
            IdlValue::Variant(
                arm.label.clone(),
                Box::new(generate(&arm.ty, rng, cfg, depth + 1)?),
            )
        }
        _ => return Err(Error::interface(format!("cannot generate a value of type {}", ty))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idl::parser::parse_value;
    use crate::idl::types::Field;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn person() -> IdlType {
        IdlType::Record(vec![
            Field::new("name", IdlType::Text),
            Field::new("age", IdlType::Nat8),
            Field::new("tags", IdlType::vec(IdlType::Text)),
            Field::new("nick", IdlType::opt(IdlType::Text)),
            Field::new(
                "status",
                IdlType::Variant(vec![
                    Field::new("active", IdlType::Null),
                    Field::new("banned", IdlType::Int8),
                ]),
            ),
        ])
    }

    #[test]
    fn test_random_values_parse_back_as_their_type() {
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = RandomConfig::default();
        let ty = person();
        for _ in 0..50 {
            let value = random_value(&ty, &mut rng, &cfg).unwrap();
            assert_eq!(parse_value(&ty, &value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn test_sized_types_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = RandomConfig::default();
        for _ in 0..200 {
            match random_value(&IdlType::Int8, &mut rng, &cfg).unwrap() {
                IdlValue::Int(i) => assert!((-128..=127).contains(&i)),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_text_and_vec_lengths_respect_config() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = RandomConfig {
            max_vec_len: 2,
            max_text_len: 4,
        };
        for _ in 0..100 {
            let IdlValue::Vec(items) =
                random_value(&IdlType::vec(IdlType::Text), &mut rng, &cfg).unwrap()
            else {
                panic!("expected vec");
            };
            assert!(items.len() <= 2);
            for item in items {
                let IdlValue::Text(s) = item else { panic!("expected text") };
                assert!((1..=4).contains(&s.len()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_value() {
        let cfg = RandomConfig::default();
        let a = random_value(&person(), &mut StdRng::seed_from_u64(42), &cfg).unwrap();
        let b = random_value(&person(), &mut StdRng::seed_from_u64(42), &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_variant_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = random_value(&IdlType::Variant(vec![]), &mut rng, &RandomConfig::default());
        assert!(err.is_err());
    }
}
