//! Help pages rendered from command specifications.

use crate::category::Category;
use crate::framework::Command;
use crate::registry::CommandRegistry;
use std::fmt::Write;
use std::sync::Arc;

/// Lists every category that has commands, with its description.
pub fn render_overview(registry: &CommandRegistry, prefix: &str) -> String {
    let mut page = String::from("**Categories**\n");

    for category in Category::ALL {
        if registry.by_category(category).is_empty() {
            continue;
        }
        let _ = writeln!(page, "`{}`: {}", category.display_name(), category.description());
    }

    let _ = write!(
        page,
        "\nUse `{prefix}help <category>` or `{prefix}help <command>` for details."
    );
    page
}

/// Lists the prefixed usage and description of each command in `category`.
pub fn render_category(registry: &CommandRegistry, category: Category, prefix: &str) -> String {
    let mut page = format!("**{}**\n{}\n", category.display_name(), category.description());

    let commands = registry.by_category(category);
    if commands.is_empty() {
        page.push_str("No commands in this category.");
        return page;
    }

    for command in commands {
        let spec = command.spec();
        let _ = writeln!(page, "`{}`: {}", spec.usage_for_prefix(prefix), spec.description());
    }

    page.truncate(page.trim_end().len());
    page
}

/// Shows usage, description, aliases, actions and the required level.
pub fn render_command(command: &Arc<dyn Command>, prefix: &str) -> String {
    let spec = command.spec();
    let mut page = format!("**{}**\n{}\n", spec.name_for_prefix(prefix), spec.description());

    let _ = write!(page, "\nUsage: `{}`", spec.usage_for_prefix(prefix));

    let aliases = spec.aliases_for_prefix(prefix);
    if !aliases.is_empty() {
        let _ = write!(page, "\nAliases: {}", aliases.join(", "));
    }

    if !spec.actions().is_empty() {
        page.push_str("\nActions:");
        for (action, description) in spec.actions() {
            let _ = write!(page, "\n  `{action}`: {description}");
        }
    }

    if spec.administrator_level_required() > 0 {
        let _ = write!(
            page,
            "\nRequired administrator level: {}",
            spec.administrator_level_required()
        );
    }
    if spec.bot_administrator_only() {
        page.push_str("\nOnly bot administrators can use this command.");
    }

    page
}
