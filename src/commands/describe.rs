use anyhow::Result;

use crate::processor::{self, ProcessorInfo, VariableSpec};

/// Print the declared inputs and outputs of a processor.
pub fn describe(name: &str) -> Result<()> {
    let Some(info) = processor::find(name) else {
        let known: Vec<_> = processor::catalog().iter().map(|i| i.name).collect();
        anyhow::bail!(
            "Unknown processor: {}. Expected one of: {}",
            name,
            known.join(", ")
        );
    };

    print!("{}", format_info(info));
    Ok(())
}

fn format_info(info: &ProcessorInfo) -> String {
    let mut out = format!("{}\n  {}\n", info.name, info.description);

    out.push_str("\nInput variables:\n");
    for var in info.inputs {
        out.push_str(&format_variable(var, true));
    }

    out.push_str("\nOutput variables:\n");
    for var in info.outputs {
        out.push_str(&format_variable(var, false));
    }

    out
}

fn format_variable(var: &VariableSpec, show_required: bool) -> String {
    if show_required {
        let required = if var.required { "required" } else { "optional" };
        format!("  {} ({}): {}\n", var.name, required, var.description)
    } else {
        format!("  {}: {}\n", var.name, var.description)
    }
}
