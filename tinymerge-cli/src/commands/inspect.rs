use std::path::Path;

use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{file_display_name, load_table},
    output::{print_counts, print_output},
};

#[derive(Debug, Serialize)]
pub struct TableInfo {
    pub file: String,
    pub version: String,
    pub namespaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyInfo>,
    pub escaped_names: bool,
    pub classes: usize,
    pub methods: usize,
    pub fields: usize,
    pub parameters: usize,
}

#[derive(Debug, Serialize)]
pub struct PropertyInfo {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let tiny = load_table(path)?;
    let header = &tiny.header;

    let info = TableInfo {
        file: file_display_name(path),
        version: format!("{}.{}", header.major, header.minor),
        namespaces: header.namespaces.clone(),
        properties: header
            .properties
            .iter()
            .map(|(key, value)| PropertyInfo {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
        escaped_names: header.escaped_names(),
        classes: tiny.classes.len(),
        methods: tiny.methods().count(),
        fields: tiny.fields().count(),
        parameters: tiny.methods().map(|(_, method)| method.params.len()).sum(),
    };

    print_output(&info, opts, |info| {
        println!("File:        {}", info.file);
        println!("Version:     {}", info.version);
        println!("Namespaces:  {}", info.namespaces.join(", "));
        println!("Escaped:     {}", info.escaped_names);

        if !info.properties.is_empty() {
            println!();
            println!("Properties:");
            for property in &info.properties {
                match &property.value {
                    Some(value) => println!("  {} = {value}", property.key),
                    None => println!("  {}", property.key),
                }
            }
        }

        println!();
        print_counts(&[
            ("classes", info.classes),
            ("methods", info.methods),
            ("fields", info.fields),
            ("parameters", info.parameters),
        ]);
    })
}
