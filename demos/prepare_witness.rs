//! Runs the whole pipeline in-process: embed a few ballots, encrypt them
//! to an election key, publish them into the accumulator, then assemble
//! and print the cancellation witness for two of them.

use num_bigint::BigUint;
use rand::rngs::OsRng;

use cancelproof::{
    compress_hex, embed_str, encrypt, insert_ballot, prepare_cancellation_witness, random_scalar,
    ExtendedPoint, Result, VoteToCancel, VoteTree, WitnessConfig,
};

fn main() -> Result<()> {
    let mut rng = OsRng;

    // The election key would normally arrive as a published hex string;
    // derive one here so the demo is self-contained.
    let recipient = ExtendedPoint::base().scalar_mul(&BigUint::from(0x5EC2E7u64));
    let recipient_hex = compress_hex(&recipient);
    println!("election key: {recipient_hex}");

    let ballots = [
        "1111-1111-1111:adams",
        "2222-2222-2222:jefferson",
        "4444-4444-4444:washington",
    ];

    let mut tree = VoteTree::new();
    let mut votes = Vec::new();

    for ballot in ballots {
        let encoded = embed_str(ballot, &mut rng)?;
        let randomizer = random_scalar(&mut rng);
        let ciphertext = encrypt(&encoded, &recipient, &randomizer);

        let leaf = insert_ballot(&mut tree, &ciphertext)?;
        println!("published {ballot:30} leaf {leaf}");

        votes.push(VoteToCancel {
            encoded: compress_hex(&encoded),
            randomizer: randomizer.to_str_radix(10),
            ciphertext: Some(compress_hex(&ciphertext)),
        });
    }

    // Cancel the first and third ballots.
    let to_cancel = vec![votes[0].clone(), votes[2].clone()];
    let bundle = prepare_cancellation_witness(&to_cancel, &recipient_hex, &tree, &WitnessConfig::default())?;

    println!("merkle root: {}", bundle.public.merkle_root);
    println!("claimed sum: {}", bundle.public.claimed_sum);
    for (i, witness) in bundle.private.iter().enumerate() {
        println!(
            "vote {i}: {} siblings, {} scalar bits",
            witness.siblings.len(),
            witness.randomizer_bits.len()
        );
    }

    Ok(())
}
