//! Tests covering expansion semantics across every restriction preset.

mod operators;

use crate::{Environment, ErrorMode, Parser, Restrictions};
use anyhow::Result;
use proptest::prelude::*;

pub(super) const FAKE_ENV: [&str; 4] = ["BAR=bar", "FOO=foo", "EMPTY=", "ALSO_EMPTY="];

/// The restriction presets a test case is run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Preset {
    Relaxed,
    NoUnset,
    NoEmpty,
    Strict,
}

pub(super) const ALL_PRESETS: [Preset; 4] = [
    Preset::Relaxed,
    Preset::NoUnset,
    Preset::NoEmpty,
    Preset::Strict,
];

pub(super) const ERR_NONE: &[Preset] = &[];
pub(super) const ERR_UNSET: &[Preset] = &[Preset::NoUnset, Preset::Strict];
pub(super) const ERR_EMPTY: &[Preset] = &[Preset::NoEmpty, Preset::Strict];
pub(super) const ERR_ALL: &[Preset] = &ALL_PRESETS;

impl Preset {
    const fn restrictions(self) -> Restrictions {
        match self {
            Self::Relaxed => Restrictions::RELAXED,
            Self::NoUnset => Restrictions::NO_UNSET,
            Self::NoEmpty => Restrictions::NO_EMPTY,
            Self::Strict => Restrictions::STRICT,
        }
    }
}

/// A template, its expansion when no error occurs, and the presets under
/// which it must fail.
pub(super) struct ExpansionTest {
    pub name: &'static str,
    pub input: &'static str,
    pub expected: &'static str,
    pub errors: &'static [Preset],
}

pub(super) fn fake_env_parser(preset: Preset) -> Parser {
    Parser::builder()
        .env(Environment::from_pairs(FAKE_ENV))
        .restrictions(preset.restrictions())
        .build()
}

pub(super) fn run_expansion_tests(tests: &[ExpansionTest]) -> Result<()> {
    for preset in ALL_PRESETS {
        let parser = fake_env_parser(preset);

        for test in tests {
            let result = parser.parse(test.input);
            let expect_error = test.errors.contains(&preset);

            match result {
                Ok(expanded) => {
                    anyhow::ensure!(
                        !expect_error,
                        "{} ({preset:?}): expected an error for {:?}, got {expanded:?}",
                        test.name,
                        test.input
                    );
                    anyhow::ensure!(
                        expanded == test.expected,
                        "{} ({preset:?}): expanding {:?} gave {expanded:?}, expected {:?}",
                        test.name,
                        test.input,
                        test.expected
                    );
                }
                Err(err) => anyhow::ensure!(
                    expect_error,
                    "{} ({preset:?}): unexpected error for {:?}: {err}",
                    test.name,
                    test.input
                ),
            }
        }
    }

    Ok(())
}

pub(super) fn any_restrictions() -> impl Strategy<Value = Restrictions> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(no_unset, no_empty, no_digit, no_replace)| Restrictions {
            no_unset,
            no_empty,
            no_digit,
            no_replace,
        },
    )
}

pub(super) fn any_error_mode() -> impl Strategy<Value = ErrorMode> {
    prop_oneof![Just(ErrorMode::FailFast), Just(ErrorMode::AllErrors)]
}
