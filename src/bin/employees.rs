use anyhow::Result;

fn main() -> Result<()> {
    employee_registry::cli::run()
}
