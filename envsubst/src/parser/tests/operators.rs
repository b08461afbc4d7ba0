use super::{ERR_ALL, ERR_EMPTY, ERR_NONE, ERR_UNSET, ExpansionTest, run_expansion_tests};
use anyhow::Result;

const fn t(
    name: &'static str,
    input: &'static str,
    expected: &'static str,
    errors: &'static [super::Preset],
) -> ExpansionTest {
    ExpansionTest {
        name,
        input,
        expected,
        errors,
    }
}

#[test]
fn plain_references() -> Result<()> {
    run_expansion_tests(&[
        t("empty", "", "", ERR_NONE),
        t("env only", "$BAR", "bar", ERR_NONE),
        t("with text", "$BAR baz", "bar baz", ERR_NONE),
        t("concatenated", "$BAR$FOO", "barfoo", ERR_NONE),
        t("2 env var", "$BAR - $FOO", "bar - foo", ERR_NONE),
        t("invalid var", "$_ bar", "$_ bar", ERR_NONE),
        t("invalid subst var", "${_} bar", "${_} bar", ERR_NONE),
        t("value of $var", "${BAR}baz", "barbaz", ERR_NONE),
        t("braced unset", "${NOTSET}", "", ERR_UNSET),
        t("braced empty", "${EMPTY}", "", ERR_EMPTY),
        t("bare unset", "$NOTSET", "", ERR_UNSET),
        t("bare empty", "$EMPTY", "", ERR_EMPTY),
        t("lone dollar", "cost: 5$ or $", "cost: 5$ or $", ERR_NONE),
    ])
}

#[test]
fn default_operators() -> Result<()> {
    run_expansion_tests(&[
        t("unset -", "${NOTSET-$BAR}", "bar", ERR_NONE),
        t("unset =", "${NOTSET=$BAR}", "bar", ERR_NONE),
        t("set but empty -", "${EMPTY-$BAR}", "", ERR_EMPTY),
        t("set but empty =", "${EMPTY=$BAR}", "", ERR_EMPTY),
        t("unset or empty :-", "${EMPTY:-$BAR}", "bar", ERR_NONE),
        t("unset or empty :=", "${EMPTY:=$BAR}", "bar", ERR_NONE),
        t("set :-", "${FOO:-$BAR}", "foo", ERR_NONE),
        t("set -", "${FOO-$NOTSET}", "foo", ERR_NONE),
        t(
            "multi line string",
            "hello $BAR\nhello ${EMPTY:=$FOO}",
            "hello bar\nhello foo",
            ERR_NONE,
        ),
        t(
            "underscores in defaults",
            "${hello:=wo_rld} ${foo:=bar_baz}",
            "wo_rld bar_baz",
            ERR_NONE,
        ),
        t(
            "defaults among text",
            "name: ${NAME:=foo_qux}, key: ${EMPTY:=baz_bar}",
            "name: foo_qux, key: baz_bar",
            ERR_NONE,
        ),
        t(
            "default containing a url",
            "prop=${HOME_URL-http://localhost:8080}",
            "prop=http://localhost:8080",
            ERR_NONE,
        ),
        t(
            "nested defaults",
            "${NOTSET:-${ALSO_NOTSET:-$FOO}}",
            "foo",
            ERR_NONE,
        ),
        t("empty default", "${NOTSET:-}", "", ERR_NONE),
    ])
}

#[test]
fn assignment_leaves_variable_untouched() -> Result<()> {
    run_expansion_tests(&[
        t(":= then reference", "${X:=a}-$X", "a-", ERR_UNSET),
        t("= then reference", "${X=a}$X", "a", ERR_UNSET),
        t(":= braced reference", "${X:=a}${X}", "a", ERR_UNSET),
        t(":= twice", "${X:=a}${X:=b}", "ab", ERR_NONE),
        t(":= on empty", "${EMPTY:=a}-$EMPTY", "a-", ERR_EMPTY),
        t(":+ after :=", "${X:=a}${X:+set}", "a", ERR_NONE),
    ])
}

#[test]
fn alternative_operators() -> Result<()> {
    run_expansion_tests(&[
        t("set +", "${EMPTY+hello}", "hello", ERR_NONE),
        t("set :+", "${EMPTY:+hello}", "hello", ERR_NONE),
        t("non-empty :+", "${FOO:+hello}", "hello", ERR_NONE),
        t("unset +", "${NOTSET+hello}", "", ERR_NONE),
        t("unset :+", "${NOTSET:+hello}", "", ERR_NONE),
        t("alternative never yields value", "${FOO+$BAR}", "bar", ERR_NONE),
    ])
}

#[test]
fn unset_variable_with_unset_default() -> Result<()> {
    run_expansion_tests(&[
        t("-", "${NOTSET-$ALSO_NOTSET}", "", ERR_UNSET),
        t(":-", "${NOTSET:-$ALSO_NOTSET}", "", ERR_UNSET),
        t("=", "${NOTSET=$ALSO_NOTSET}", "", ERR_UNSET),
        t(":=", "${NOTSET:=$ALSO_NOTSET}", "", ERR_UNSET),
        t("+", "${NOTSET+$ALSO_NOTSET}", "", ERR_NONE),
        t(":+", "${NOTSET:+$ALSO_NOTSET}", "", ERR_NONE),
    ])
}

#[test]
fn empty_variable_with_unset_default() -> Result<()> {
    run_expansion_tests(&[
        t("-", "${EMPTY-$NOTSET}", "", ERR_EMPTY),
        t(":-", "${EMPTY:-$NOTSET}", "", ERR_UNSET),
        t("=", "${EMPTY=$NOTSET}", "", ERR_EMPTY),
        t(":=", "${EMPTY:=$NOTSET}", "", ERR_UNSET),
        t("+", "${EMPTY+$NOTSET}", "", ERR_UNSET),
        t(":+", "${EMPTY:+$NOTSET}", "", ERR_UNSET),
    ])
}

#[test]
fn unset_variable_with_empty_default() -> Result<()> {
    run_expansion_tests(&[
        t("-", "${NOTSET-$EMPTY}", "", ERR_EMPTY),
        t(":-", "${NOTSET:-$EMPTY}", "", ERR_EMPTY),
        t("=", "${NOTSET=$EMPTY}", "", ERR_EMPTY),
        t(":=", "${NOTSET:=$EMPTY}", "", ERR_EMPTY),
        t("+", "${NOTSET+$EMPTY}", "", ERR_NONE),
        t(":+", "${NOTSET:+$EMPTY}", "", ERR_NONE),
    ])
}

#[test]
fn empty_variable_with_empty_default() -> Result<()> {
    run_expansion_tests(&[
        t("-", "${EMPTY-$ALSO_EMPTY}", "", ERR_EMPTY),
        t(":-", "${EMPTY:-$ALSO_EMPTY}", "", ERR_EMPTY),
        t("=", "${EMPTY=$ALSO_EMPTY}", "", ERR_EMPTY),
        t(":=", "${EMPTY:=$ALSO_EMPTY}", "", ERR_EMPTY),
        t("+", "${EMPTY+$ALSO_EMPTY}", "", ERR_EMPTY),
        t(":+", "${EMPTY:+$ALSO_EMPTY}", "", ERR_EMPTY),
    ])
}

#[test]
fn unterminated_brace() -> Result<()> {
    run_expansion_tests(&[
        t("closing brace expected", "hello ${", "", ERR_ALL),
        t("unterminated default", "${A:-${B}", "", ERR_ALL),
    ])
}
