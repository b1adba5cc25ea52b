use crate::cli::SchemesArgs;
use crate::error::Result;
use molrow::core::descriptors::DescriptorKind;
use molrow::engine::catalog::SchemeCatalog;

pub fn run(args: SchemesArgs) -> Result<()> {
    let kinds: Vec<DescriptorKind> = match args.descriptor {
        Some(kind) => vec![kind],
        None => DescriptorKind::ALL.to_vec(),
    };
    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render(*kind));
    }
    Ok(())
}

/// Renders the scheme table of one descriptor.
fn render(kind: DescriptorKind) -> String {
    let catalog = SchemeCatalog::for_descriptor(kind);
    let mut out = format!(
        "{} ({} values per cell: {})\n",
        kind,
        kind.value_names().len(),
        kind.value_names().join(" ")
    );
    out.push_str(&format!("  {:<12} {:<28} {}\n", "IDENTIFIER", "COLUMN TITLE", "PARAMETER"));
    for scheme in catalog.iter() {
        out.push_str(&format!(
            "  {:<12} {:<28} {}\n",
            scheme.identifier, scheme.title, scheme.parameter
        ));
    }
    out
}
