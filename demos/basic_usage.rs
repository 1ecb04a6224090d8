//! Transform a short signal, convolve it with itself and merge a batch of
//! sequences. Run with `cargo run --example basic_usage --features verbose-logging`
//! and `RUST_LOG=debug` to see table builds and merge plans.

use std::error::Error;

use ipfft::num::{complex_to_real, real_to_complex, round_in_place};
use ipfft::{Complex64, Convolver, FftImpl, Radix2Fft};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let fft = Radix2Fft::<f64>::new();
    let signal: Vec<f64> = (1..=8).map(|i| i as f64).collect();
    let mut data = real_to_complex(&signal);
    fft.fft(&mut data)?;
    println!("spectrum: {:?}", data);
    fft.ifft(&mut data)?;
    let mut restored = complex_to_real(&data);
    round_in_place(&mut restored);
    println!("roundtrip: {:?}", restored);

    let conv = Convolver::with_fft(fft.clone());
    let x = real_to_complex(&signal);
    let mut product = complex_to_real(&conv.convolve(&x, &x)?);
    round_in_place(&mut product);
    println!("self-convolution: {:?}", product);

    let taps: Vec<Vec<Complex64>> = (0..6).map(|_| real_to_complex(&[1.0, 1.0])).collect();
    let mut binomial = complex_to_real(&conv.multi_convolve(&taps)?);
    round_in_place(&mut binomial);
    println!("(1 + x)^6: {:?}", binomial);

    if let Err(err) = fft.fft(&mut vec![Complex64::zero(); 12]) {
        println!("rejected: {}", err);
    }
    println!("cached lengths: {}", fft.cache().len());
    Ok(())
}
