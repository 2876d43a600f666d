use crate::cli::utils::format_table;
use crate::cli::OutputFormat;
use crate::richmenu::template;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let catalog = template::catalog();

    match output_format {
        OutputFormat::Json => {
            let views: Vec<_> = catalog.iter().map(|t| t.view()).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = catalog
                .iter()
                .map(|t| {
                    vec![
                        t.id.to_string(),
                        format!("{}x{}", t.size.width, t.size.height),
                        t.areas.len().to_string(),
                        t.label.to_string(),
                    ]
                })
                .collect();
            println!("{}", format_table(&["ID", "SIZE", "AREAS", "DESCRIPTION"], &rows));
        }
    }
    Ok(())
}
