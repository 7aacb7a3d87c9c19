// Benchtrail - Criterion benchmark history tracker
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

const SUPPORTED_SHELLS: &str = "bash, zsh, fish, powershell, elvish";

/// Write the completion script for `cmd` to stdout.
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::shells::Bash;
/// use benchtrail_cli::commands::generate_completion_for_command;
///
/// let mut cmd = Command::new("benchtrail");
/// generate_completion_for_command(Bash, &mut cmd).unwrap();
/// ```
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
    Ok(())
}

/// Error returned for a shell name with no generator.
pub fn unsupported_shell(shell: &str) -> CliError {
    CliError::invalid_input(format!(
        "Unsupported shell: '{}'. Supported shells: {}",
        shell, SUPPORTED_SHELLS
    ))
}

/// Installation instructions for `shell` (case-insensitive).
///
/// ```
/// use benchtrail_cli::commands::installation_instructions;
///
/// assert!(installation_instructions("zsh").unwrap().contains("_benchtrail"));
/// assert!(installation_instructions("tcsh").is_err());
/// ```
pub fn installation_instructions(shell: &str) -> Result<&'static str, CliError> {
    let text = match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash completion installation:

# For current session only:
eval "$(benchtrail completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(benchtrail completion bash)"' >> ~/.bashrc

# Or save to completions directory:
benchtrail completion bash > ~/.local/share/bash-completion/completions/benchtrail
"#
        }
        "zsh" => {
            r#"# Zsh completion installation:

# For current session only:
eval "$(benchtrail completion zsh)"

# Or save to a directory in $fpath:
benchtrail completion zsh > ~/.zsh/completions/_benchtrail
"#
        }
        "fish" => {
            r#"# Fish completion installation:

benchtrail completion fish > ~/.config/fish/completions/benchtrail.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell completion installation:

# Add this line to the profile at $PROFILE:
benchtrail completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish completion installation:

# Add to ~/.elvish/rc.elv:
eval (benchtrail completion elvish)
"#
        }
        _ => return Err(unsupported_shell(shell)),
    };
    Ok(text)
}
