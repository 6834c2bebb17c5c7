use anyhow::{Context, Result};

use redeem_mda::{
    array_dimensions, array_ref, array_set, array_to_list, list_to_array, MultiDimArray,
    NestedList,
};

fn main() -> Result<()> {
    env_logger::init();

    // P(C | A, B) for binary A and three-valued B, C
    let list: NestedList<f64> = serde_json::from_str(
        r#"[
            [[0.64, 0.16, 0.2], [0.3, 0.5, 0.2], [0.1, 0.1, 0.8]],
            [[0.9, 0.04, 0.06], [0.25, 0.25, 0.5], [0.05, 0.15, 0.8]]
        ]"#,
    )?;
    let mut cpt = list_to_array(&list)?;

    println!("Dimensions: {:?}", array_dimensions(&cpt));
    println!("P(c=1 | a=0, b=0) = {:?}", array_ref(&cpt, &[0, 0, 1])?.as_scalar());
    println!("P(c=0 | a=1, b=0) = {}", cpt[[1, 0, 0]]);
    println!("Rows normalized: {}", cpt.is_normalized_along_last_axis(1e-9));

    array_set(&mut cpt, 0.007, &[0, 0, 1])?;
    println!("After update: {}", cpt);
    println!("Rows normalized: {}", cpt.is_normalized_along_last_axis(1e-9));

    let json = serde_json::to_string(&cpt)?;
    let reloaded: MultiDimArray<f64> =
        serde_json::from_str(&json).context("Failed to reload table")?;
    assert_eq!(array_to_list(&reloaded), array_to_list(&cpt));
    println!("Round-tripped through JSON: {}", json);

    Ok(())
}
