//! Main class and per-command class assembly

use plugscript_ast::naming::{capitalize, reindent};
use plugscript_ast::Translation;
use plugscript_manifest::{CommandDefinition, EventDefinition, PluginDescriptor, MAIN_CLASS};

use crate::java::{JavaClass, JavaFile, Member, Method};
use crate::templates;

const BODY_INDENT: &str = "    ";

/// Parameter names already bound by `onCommand`
const DISPATCH_PARAMS: &[&str] = &["sender", "command", "label", "args"];

const ON_COMMAND: &str =
    "public boolean onCommand(CommandSender sender, Command command, String label, String[] args)";

/// Class name for a command: capitalized, with non-identifier characters replaced
pub fn command_class_name(command: &str) -> String {
    java_identifier(&capitalize(command))
}

/// Handler method name for an event: `on` + capitalized event name
pub fn event_method_name(event: &str) -> String {
    java_identifier(&format!("on{}", capitalize(event)))
}

fn java_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Strip surrounding blank lines and the indentation common to every line
fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = lines.iter().position(|line| !is_blank(line)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|line| !is_blank(line)).map_or(start, |i| i + 1);
    let lines = &lines[start..end];

    // Counted in chars: leading whitespace may be multibyte
    let margin = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| strip_margin(line, margin).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop up to `margin` leading whitespace chars
fn strip_margin(line: &str, margin: usize) -> &str {
    let mut rest = line;
    for _ in 0..margin {
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => rest = chars.as_str(),
            _ => break,
        }
    }
    rest
}

/// Command body as inlined into a boolean `onCommand`
fn dispatch_body(command: &CommandDefinition) -> String {
    let mut body = String::new();
    if !DISPATCH_PARAMS.contains(&command.param.as_str()) {
        body.push_str(&format!("CommandSender {} = sender;\n", command.param));
    }
    body.push_str(&dedent(&command.body));
    body.replace("return;", "return true;")
}

pub fn main_class(translation: &Translation) -> JavaFile {
    let plugin = &translation.plugin;
    let capabilities = translation.capabilities();

    let mut class = JavaClass::new(MAIN_CLASS);
    class.extends = Some("JavaPlugin".to_string());
    class.implements = vec!["CommandExecutor".to_string(), "Listener".to_string()];

    let mut file_imports: Vec<&str> = Vec::new();
    file_imports.extend(templates::COMMAND_IMPORTS);
    file_imports.extend(templates::LISTENER_IMPORTS);
    file_imports.extend(templates::COMMON_IMPORTS);

    if plugin.uses_data {
        class.members.push(Member::Block(templates::data_handler(&plugin.name, &plugin.data_file)));
        file_imports.extend(templates::DATA_IMPORTS);
    }
    if capabilities.description {
        class.members.push(Member::Block(templates::description_helper()));
    }

    let mut on_enable = Method::new("public void onEnable()").annotated("@Override");
    on_enable.push_line("getLogger().info(\"Plugin enabled!\");");
    on_enable.push_line("getServer().getPluginManager().registerEvents(this, this);");
    class.members.push(Member::Method(on_enable));

    class.members.push(Member::Method(dispatch_method(&translation.commands)));

    for event in &translation.events {
        class.members.push(Member::Method(event_method(event)));
    }

    if capabilities.fetch {
        class.members.push(Member::Block(templates::fetch_helper()));
        file_imports.extend(templates::FETCH_IMPORTS);
    }
    if capabilities.json_parse {
        class.members.push(Member::Block(templates::parse_json_helper()));
        file_imports.extend(templates::JSON_IMPORTS);
    }

    let mut file = JavaFile::new(&plugin.package, class);
    file.import(file_imports);
    file
}

fn dispatch_method(commands: &[CommandDefinition]) -> Method {
    let mut method = Method::new(ON_COMMAND).annotated("@Override");
    for command in commands {
        method.push_line(format!(
            "if (command.getName().equalsIgnoreCase(\"{}\")) {{",
            templates::java_string(&command.name)
        ));
        method.push_text(&reindent(&dispatch_body(command), BODY_INDENT));
        method.push_line(format!("{}return true;", BODY_INDENT));
        method.push_line("}");
        method.push_line("");
    }
    method.push_line("return false;");
    method
}

fn event_method(event: &EventDefinition) -> Method {
    let mut method = Method::new(&format!(
        "public void {}({} {})",
        event_method_name(&event.name),
        event.event_type.qualified_name(),
        event.param
    ))
    .annotated("@EventHandler");
    method.push_text(&dedent(&event.body));
    method
}

/// Standalone executor duplicating one command's dispatch branch
pub fn command_class(plugin: &PluginDescriptor, command: &CommandDefinition) -> JavaFile {
    let mut method = Method::new(ON_COMMAND).annotated("@Override");
    method.push_text(&dispatch_body(command));
    method.push_line("return true;");

    let mut class = JavaClass::new(&command_class_name(&command.name));
    class.implements = vec!["CommandExecutor".to_string()];
    class.members.push(Member::Method(method));

    let mut file = JavaFile::new(&plugin.package, class);
    file.import(
        templates::COMMAND_IMPORTS
            .iter()
            .chain(templates::COMMON_IMPORTS)
            .copied(),
    );
    file
}
