mod common;
use common::{Fixture, run_args};

#[cfg(test)]
use pretty_assertions::assert_eq;

#[test]
fn hapmap_parents() -> anyhow::Result<()> {
    let vcf    = Fixture::copy("vcf/parents.vcf");
    let output = Fixture::blank("hapmap/parents.hmp.txt");

    run_args(&format!("vcfbox-rs hapmap --vcf {vcf} --output {output}"))?;
    validate_file!("test-data/expected/parents.hmp.txt", &*output);
    Ok(())
}

#[test]
fn hapmap_overwrite_guard() -> anyhow::Result<()> {
    let vcf    = Fixture::copy("vcf/parents.vcf");
    let output = Fixture::blank("parents.hmp.txt");
    std::fs::write(&*output, "")?;

    assert!(run_args(&format!("vcfbox-rs hapmap -i {vcf} -o {output}")).is_err());
    run_args(&format!("vcfbox-rs hapmap -i {vcf} -o {output} -w"))?;
    validate_file!("test-data/expected/parents.hmp.txt", &*output);
    Ok(())
}
