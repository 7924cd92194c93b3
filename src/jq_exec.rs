use anyhow::{anyhow, bail, Context, Result};
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run a jq filter over `input`; it must produce exactly one document.
pub fn run_single(filter_src: &str, input: &Value) -> Result<Value> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let modules = loader
        .load(&arena, load::File { code: filter_src, path: () })
        .map_err(|errs| {
            let reasons: Vec<String> = errs.iter().map(|(_, err)| format!("{err:?}")).collect();
            anyhow!("cannot parse jq filter `{filter_src}`: {}", reasons.join("; "))
        })?;
    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            let names: Vec<&str> = errs
                .iter()
                .flat_map(|(_, undefined)| undefined.iter().map(|(name, _)| *name))
                .collect();
            anyhow!("jq filter `{filter_src}` uses undefined names: {}", names.join(", "))
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let mut outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));
    let document = match outputs.next() {
        Some(result) => result.map_err(|err| anyhow!("jq filter `{filter_src}` failed: {err:?}"))?,
        None => bail!("jq filter `{filter_src}` produced no document, expected exactly one"),
    };
    let extra = outputs.count();
    if extra > 0 {
        bail!("jq filter `{filter_src}` produced {} documents, expected exactly one", extra + 1);
    }
    tracing::debug!(filter = filter_src, "jq filter applied");

    // Val renders as JSON text
    let text = document.to_string();
    serde_json::from_str(&text).with_context(|| format!("jq output is not JSON: {text}"))
}
