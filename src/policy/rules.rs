//! Built-in rule tables and their compiled form.
//!
//! Every group is a list of regular expressions searched (not anchored)
//! against one string. Groups that flag risk are case-insensitive so a
//! changed letter case cannot slip past them; allow-lists are case-sensitive
//! so they never widen beyond what is written here.
//!
//! A trailing `$` in a table entry also accepts one final newline before the
//! end of the text; it is compiled as `\n?\z`.

use regex::{RegexSet, RegexSetBuilder};

use crate::Result;

/// Tools with no mutating side effect; approved without looking at parameters.
pub const SAFE_TOOLS: &[&str] = &[
    "Read",
    "Glob",
    "Grep",
    "TodoWrite",
    "WebFetch",
    "WebSearch",
    "BashOutput",
    "Task",
];

/// Tools that modify an existing file in place.
pub const EDIT_TOOLS: &[&str] = &["Edit", "MultiEdit"];

/// Tool that creates or overwrites a file.
pub const WRITE_TOOL: &str = "Write";

/// Tool that runs a shell command.
pub const SHELL_TOOL: &str = "Bash";

/// Category of a tool identifier, deciding which rule groups apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Listed in [`SAFE_TOOLS`].
    ReadOnly,
    /// Listed in [`EDIT_TOOLS`].
    Edit,
    /// [`WRITE_TOOL`].
    Write,
    /// [`SHELL_TOOL`].
    Shell,
    /// Anything else.
    Unknown,
}

impl ToolKind {
    /// Classify a tool identifier. Matching is exact and case-sensitive.
    #[must_use]
    pub fn classify(tool_name: &str) -> Self {
        if SAFE_TOOLS.contains(&tool_name) {
            Self::ReadOnly
        } else if EDIT_TOOLS.contains(&tool_name) {
            Self::Edit
        } else if tool_name == WRITE_TOOL {
            Self::Write
        } else if tool_name == SHELL_TOOL {
            Self::Shell
        } else {
            Self::Unknown
        }
    }
}

/// Whether a group matches regardless of letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Letters must match exactly.
    Sensitive,
    /// Letters match in either case.
    Insensitive,
}

/// Static definition of a named rule group.
#[derive(Debug, Clone, Copy)]
pub struct RuleGroupSpec {
    /// Group name, used as the prefix of reported rule names.
    pub name: &'static str,
    /// Case handling for every pattern in the group.
    pub case: CaseMode,
    /// Ordered regular expressions.
    pub patterns: &'static [&'static str],
}

/// File paths whose modification needs a human.
pub const SENSITIVE_PATHS: RuleGroupSpec = RuleGroupSpec {
    name: "sensitive_paths",
    case: CaseMode::Insensitive,
    patterns: &[
        r"\.env",
        r"\.git/",
        r"package\.json$",
        r"package-lock\.json$",
        r"\.claude/",
        r"/etc/",
        r"/root/",
        r"ssh",
        r"credentials",
        r"secrets",
        r"\.key$",
        r"\.pem$",
    ],
};

/// Paths a new file may be written to without asking.
///
/// `^[^/]*src/` accepts any first path segment ending in `src/`, so
/// `xsrc/file.ts` passes as well as `src/file.ts`.
pub const SAFE_WRITES: RuleGroupSpec = RuleGroupSpec {
    name: "safe_writes",
    case: CaseMode::Sensitive,
    patterns: &[
        r"^[^/]*src/",
        r"\.md$",
        r"\.txt$",
        r"\.json$",
        r"\.tsx?$",
        r"\.jsx?$",
        r"\.css$",
        r"\.scss$",
    ],
};

/// Shell fragments that always need a human, wherever they appear.
pub const DANGEROUS_COMMANDS: RuleGroupSpec = RuleGroupSpec {
    name: "dangerous_commands",
    case: CaseMode::Insensitive,
    patterns: &[
        r"rm\s+-rf",
        r"sudo\s",
        r"chmod\s+[0-9]*77",
        r">/etc/",
        r"curl.*\|\s*(bash|sh)",
        r"wget.*\|\s*(bash|sh)",
        r"git push.*--force",
        r"git reset.*--hard",
        r"npm publish",
        r"yarn publish",
        r"docker.*run.*--privileged",
        r"systemctl",
        r"service\s",
        r"killall",
        r"pkill\s+-9",
    ],
};

/// Shell commands approved when no dangerous fragment is present.
pub const SAFE_COMMANDS: RuleGroupSpec = RuleGroupSpec {
    name: "safe_commands",
    case: CaseMode::Sensitive,
    patterns: &[
        // Build and development
        r"^npm run (build|dev|start|lint|test)",
        r"^yarn (build|dev|start|lint|test)",
        r"^pnpm (build|dev|start|lint|test)",
        // Read-only file and text utilities
        r"^ls\s",
        r"^pwd$",
        r"^cat\s",
        r"^head\s",
        r"^tail\s",
        r"^find\s",
        r"^grep\s",
        r"^rg\s",
        // Read-only git inspection
        r"^git status",
        r"^git log",
        r"^git diff",
        r"^git show",
        r"^git branch",
        r"^git remote",
        // Node tooling
        r"^node\s",
        r"^npx tsc",
        r"^npm list",
        r"^npm outdated",
        // System info
        r"^which\s",
        r"^whereis\s",
        r"^whoami$",
        r"^date$",
        r"^uname",
        r"^echo\s",
    ],
};

/// A rule group compiled into a [`RegexSet`].
///
/// Set indices line up with the pattern list, so the first matching index
/// names the rule that fired.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    name: &'static str,
    case: CaseMode,
    set: RegexSet,
    patterns: &'static [&'static str],
}

impl RuleGroup {
    /// Compile a group definition.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Policy` if any pattern is not a valid regex.
    pub fn compile(spec: &RuleGroupSpec) -> Result<Self> {
        let compiled = spec.patterns.iter().map(|p| end_anchor_allows_newline(p));
        let set = RegexSetBuilder::new(compiled)
            .case_insensitive(spec.case == CaseMode::Insensitive)
            .build()?;

        Ok(Self {
            name: spec.name,
            case: spec.case,
            set,
            patterns: spec.patterns,
        })
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Case handling of the group.
    #[must_use]
    pub fn case(&self) -> CaseMode {
        self.case
    }

    /// Whether any pattern matches anywhere in `haystack`.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.set.is_match(haystack)
    }

    /// The earliest-listed pattern that matches, if any.
    #[must_use]
    pub fn first_match(&self, haystack: &str) -> Option<&'static str> {
        self.set
            .matches(haystack)
            .iter()
            .next()
            .map(|idx| self.patterns[idx])
    }

    /// Qualified name (`group:pattern`) of the first matching rule.
    #[must_use]
    pub fn matched_rule(&self, haystack: &str) -> Option<String> {
        self.first_match(haystack)
            .map(|pattern| format!("{}:{pattern}", self.name))
    }
}

/// Rewrite an unescaped trailing `$` to `\n?\z`.
fn end_anchor_allows_newline(pattern: &str) -> String {
    match pattern.strip_suffix('$') {
        Some(stem) if stem.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0 => {
            format!(r"{stem}\n?\z")
        }
        _ => pattern.to_owned(),
    }
}

/// Every rule group the evaluator consults, compiled once per process.
#[derive(Debug, Clone)]
pub struct Rulebook {
    /// Paths that need a human for edits and writes.
    pub sensitive_paths: RuleGroup,
    /// Paths pre-approved for new-file writes.
    pub safe_writes: RuleGroup,
    /// Command fragments that always need a human.
    pub dangerous_commands: RuleGroup,
    /// Commands pre-approved when nothing dangerous is present.
    pub safe_commands: RuleGroup,
}

impl Rulebook {
    /// Compile the built-in rule tables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Policy` if any built-in pattern fails to compile.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            sensitive_paths: RuleGroup::compile(&SENSITIVE_PATHS)?,
            safe_writes: RuleGroup::compile(&SAFE_WRITES)?,
            dangerous_commands: RuleGroup::compile(&DANGEROUS_COMMANDS)?,
            safe_commands: RuleGroup::compile(&SAFE_COMMANDS)?,
        })
    }
}
