use clap::Command;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Bash glue that routes tag arguments through `snaptag complete`.
const BASH_DYNAMIC_HOOK: &str = r#"
_snaptag_tags() {
    local cur prev
    cur="${COMP_WORDS[COMP_CWORD]}"
    prev="${COMP_WORDS[COMP_CWORD-1]}"
    case "$prev" in
        resume|load|delete)
            COMPREPLY=( $(snaptag complete bash "$PWD" "${COMP_LINE}" "$cur" "$prev") )
            return 0
            ;;
    esac
    _snaptag "$@"
}
complete -F _snaptag_tags -o bashdefault -o default snaptag
"#;

/// Write a completion script for `shell` to `out`.
///
/// Static completions come from the clap definition. For bash, a hook is
/// appended so tag arguments complete from saved checkpoints.
pub fn generate_completions(
    cmd: &mut Command,
    shell: Shell,
    out: &mut dyn Write,
) -> io::Result<()> {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);

    if shell == Shell::Bash {
        out.write_all(BASH_DYNAMIC_HOOK.as_bytes())?;
    }
    out.flush()
}
