//! Live search against the public GWAS Catalog.
//!
//! Run with: cargo test --package gwascat-client --test test_gwas_search -- --ignored --nocapture

use gwascat_client::normalise::{project_default, ParseType};
use gwascat_client::{enrich, flatten, GwasCatalogClient};

#[tokio::test]
#[ignore] // Requires network access
async fn test_search_baldness() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();
    let client = GwasCatalogClient::new()?;
    let params = client.params_with([("max_results", "20")])?;

    let resp = client.search("baldness", &params).await?;
    println!("Found {} associations", resp.docs().len());

    let pairs = flatten(&resp)?;
    for pair in pairs.iter().take(10) {
        println!("{} {}", pair.rs_id, pair.allele);
    }

    let snps = project_default(&resp, &ParseType::Custom)?;
    println!("{} distinct SNPs", snps.len());

    assert!(!pairs.is_empty(), "Should find at least one association");
    Ok(())
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_batch_enrich_apoe() -> anyhow::Result<()> {
    let client = GwasCatalogClient::new()?;
    let batch = client.batch_search(&["rs7412", "rs429358"], client.defaults()).await;
    let enrichment = enrich(&batch);

    for (term, n) in enrichment.global.most_common(10) {
        println!("{n:>4}  {term}");
    }
    for (id, e) in &batch.failures {
        println!("{id}: {e}");
    }

    assert!(!enrichment.per_identifier.is_empty());
    Ok(())
}
