#![no_main]
#![allow(missing_docs)]

use anyhow::Result;
use envsubst::{ErrorMode, Restrictions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct ExpansionInput {
    template: String,
    env: Vec<(String, String)>,
    restrictions: Restrictions,
    mode: ErrorMode,
}

fn check_expansion(input: &ExpansionInput) -> Result<()> {
    let pairs: Vec<String> = input
        .env
        .iter()
        .map(|(name, value)| std::format!("{name}={value}"))
        .collect();

    //
    // Expand the template as-is; any outcome is fine as long as it doesn't panic.
    //
    let result = envsubst::evaluate(&input.template, &pairs, input.restrictions, input.mode);

    //
    // Templates without a `$` must come back unchanged.
    //
    if !input.template.contains('$') && result.as_deref() != Ok(input.template.as_str()) {
        return Err(anyhow::anyhow!(
            "Marker-free template changed: {:?} => {result:?}",
            input.template
        ));
    }

    //
    // Doubling every `$` must escape the whole template.
    //
    let escaped = input.template.replace('$', "$$");
    let unescaped = envsubst::evaluate(&escaped, &pairs, input.restrictions, input.mode);
    if unescaped.as_deref() != Ok(input.template.as_str()) {
        return Err(anyhow::anyhow!(
            "Escaped template didn't round-trip: {escaped:?} => {unescaped:?}"
        ));
    }

    Ok(())
}

fuzz_target!(|input: ExpansionInput| {
    check_expansion(&input).unwrap();
});
