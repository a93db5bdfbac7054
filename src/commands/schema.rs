use anyhow::Result;
use tracing::info;

use crate::cli::SchemaArgs;
use crate::schema::SchemaDescriptor;
use crate::util::{to_json_pretty, write_json_pretty};

pub fn run(args: SchemaArgs) -> Result<()> {
    let schema = SchemaDescriptor::incident();
    let document = schema.to_document()?;

    match args.out {
        Some(path) => {
            write_json_pretty(&path, &document)?;
            info!(
                path = %path.display(),
                fields = schema.fields().len(),
                "wrote incident schema"
            );
        }
        None => println!("{}", to_json_pretty(&document)?),
    }

    Ok(())
}
