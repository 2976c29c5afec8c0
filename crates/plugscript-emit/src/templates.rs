//! Fixed Java members emitted when a capability is in use
//!
//! Placeholders are `__UPPER__` tokens replaced with escaped values, so the
//! Java braces need no escaping.

const DATA_HANDLER: &str = r#"private static final DataHandler data = new DataHandler();

public static class DataHandler {
    private static final String PLUGIN_FOLDER = "__PLUGIN_NAME__";
    private static final String DATA_FILE = "__DATA_FILE__";
    private static JSONObject jsonObject = new JSONObject();

    public DataHandler() {
        loadData();
    }

    @SuppressWarnings("unchecked")
    public void set(String key, Object value) {
        jsonObject.put(key, value);
        saveData();
    }

    public Object get(String key) {
        return jsonObject.get(key);
    }

    public String getString(String key) {
        Object val = jsonObject.get(key);
        return val == null ? null : val.toString();
    }

    @SuppressWarnings("unchecked")
    public void setArray(String key, List<String> list) {
        JSONArray array = new JSONArray();
        array.addAll(list);
        jsonObject.put(key, array);
        saveData();
    }

    public List<String> getArray(String key) {
        Object val = jsonObject.get(key);
        List<String> result = new ArrayList<>();
        if (val instanceof JSONArray) {
            for (Object o : (JSONArray) val) {
                result.add(o.toString());
            }
        }
        return result;
    }

    private void loadData() {
        File folder = new File("plugins", PLUGIN_FOLDER);
        folder.mkdirs();

        File file = new File(folder, DATA_FILE);
        if (!file.exists()) {
            jsonObject = new JSONObject();
            saveData();
            return;
        }
        try {
            String content = Files.readString(file.toPath());
            JSONParser parser = new JSONParser();
            jsonObject = (JSONObject) parser.parse(content);
        } catch (IOException | ParseException e) {
            e.printStackTrace();
            jsonObject = new JSONObject();
        }
    }

    private void saveData() {
        File folder = new File("plugins", PLUGIN_FOLDER);
        folder.mkdirs();

        File file = new File(folder, DATA_FILE);
        try {
            Files.writeString(file.toPath(), jsonObject.toJSONString());
        } catch (IOException e) {
            e.printStackTrace();
        }
    }
}"#;

const DESCRIPTION_HELPER: &str = "public void description(String msg) {\n}";

const FETCH_HELPER: &str = r#"public static String fetch(String url) {
    try {
        HttpClient client = HttpClient.newHttpClient();
        HttpRequest request = HttpRequest.newBuilder()
                .uri(URI.create(url))
                .build();
        HttpResponse<String> response = client.send(request, HttpResponse.BodyHandlers.ofString());
        return response.body();
    } catch (Exception e) {
        e.printStackTrace();
        return "";
    }
}"#;

const PARSE_JSON_HELPER: &str = r#"public static JSONObject parseJson(String jsonText) {
    try {
        Object obj = new JSONParser().parse(jsonText);
        if (obj instanceof JSONObject) {
            return (JSONObject) obj;
        }
        return new JSONObject();
    } catch (Exception e) {
        e.printStackTrace();
        return new JSONObject();
    }
}"#;

pub(crate) const DATA_IMPORTS: &[&str] = &[
    "java.io.File",
    "java.io.IOException",
    "java.nio.file.Files",
    "org.json.simple.JSONArray",
    "org.json.simple.JSONObject",
    "org.json.simple.parser.JSONParser",
    "org.json.simple.parser.ParseException",
];

pub(crate) const FETCH_IMPORTS: &[&str] = &[
    "java.net.URI",
    "java.net.http.HttpClient",
    "java.net.http.HttpRequest",
    "java.net.http.HttpResponse",
];

pub(crate) const JSON_IMPORTS: &[&str] = &[
    "org.json.simple.JSONObject",
    "org.json.simple.parser.JSONParser",
];

/// Types rewritten bodies may name regardless of capability flags
pub(crate) const COMMON_IMPORTS: &[&str] = &[
    "java.util.ArrayList",
    "java.util.List",
    "org.bukkit.Server",
    "org.bukkit.entity.Player",
];

pub(crate) const COMMAND_IMPORTS: &[&str] = &[
    "org.bukkit.command.Command",
    "org.bukkit.command.CommandExecutor",
    "org.bukkit.command.CommandSender",
];

pub(crate) const LISTENER_IMPORTS: &[&str] = &[
    "org.bukkit.event.EventHandler",
    "org.bukkit.event.Listener",
    "org.bukkit.event.block.*",
    "org.bukkit.event.entity.*",
    "org.bukkit.event.player.*",
    "org.bukkit.plugin.java.JavaPlugin",
];

/// Escape text for a Java string literal
pub(crate) fn java_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

pub(crate) fn data_handler(plugin_name: &str, data_file: &str) -> String {
    DATA_HANDLER
        .replace("__PLUGIN_NAME__", &java_string(plugin_name))
        .replace("__DATA_FILE__", &java_string(data_file))
}

pub(crate) fn description_helper() -> String {
    DESCRIPTION_HELPER.to_string()
}

pub(crate) fn fetch_helper() -> String {
    FETCH_HELPER.to_string()
}

pub(crate) fn parse_json_helper() -> String {
    PARSE_JSON_HELPER.to_string()
}
