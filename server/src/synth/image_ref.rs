use super::SynthOptions;

/// The reference a steamapp's image is published under: `<registry>/<app_id>`,
/// tagged with the branch unless it is the default branch.
///
/// The branch is used verbatim, so it must be validated before the reference is
/// interpolated into a shell script.
pub fn image_ref(registry: &str, app_id: u32, branch: Option<&str>, opts: &SynthOptions) -> String {
    match opts.beta_branch(branch) {
        Some(branch) => format!("{registry}/{app_id}:{branch}"),
        None => format!("{registry}/{app_id}"),
    }
}
