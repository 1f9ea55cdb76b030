#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use repairaj_core::function_file::{rewrite_on_load, storage_removal_prefix};

#[derive(Debug, Arbitrary)]
struct Input {
    model: String,
    animations: Vec<String>,
    original: String,
}

fuzz_target!(|input: Input| {
    // Directory names never contain newlines.
    if input.model.contains('\n') {
        return;
    }
    let mut animations: Vec<String> = input
        .animations
        .into_iter()
        .filter(|a| !a.contains('\n'))
        .collect();
    animations.sort();
    animations.dedup();

    let prefix = storage_removal_prefix(&input.model);
    let removals = |s: &str| -> Vec<String> {
        s.split('\n')
            .filter(|l| l.starts_with(&prefix))
            .map(str::to_string)
            .collect()
    };

    let once = rewrite_on_load(&input.model, &animations, &input.original);
    let twice = rewrite_on_load(&input.model, &animations, &once);
    assert_eq!(removals(&once).len(), animations.len());
    assert_eq!(removals(&once), removals(&twice), "removal block must converge");
    assert_eq!(
        twice.split('\n').count(),
        once.split('\n').count() + animations.len()
    );
});
