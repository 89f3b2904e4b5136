//! Remote command wrapping
//!
//! Every command the engine issues is built host-agnostically and then
//! funnelled through [`wrap_for_host`], which leaves local commands alone
//! and prefixes remote ones with the remote shell.

/// Wrap `command` so it runs on `host` (as `user`, if given)
///
/// With no host the command is returned unchanged. Otherwise the result is
/// `[remote_shell, "user@host" | "host", ...command]`.
pub fn wrap_for_host(
    command: Vec<String>,
    remote_shell: &str,
    user: Option<&str>,
    host: Option<&str>,
) -> Vec<String> {
    let Some(host) = host else {
        return command;
    };

    let target = match user {
        Some(user) => format!("{}@{}", user, host),
        None => host.to_string(),
    };

    let mut wrapped = Vec::with_capacity(command.len() + 2);
    wrapped.push(remote_shell.to_string());
    wrapped.push(target);
    wrapped.extend(command);
    wrapped
}
