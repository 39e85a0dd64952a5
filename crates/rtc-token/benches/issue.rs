//! Token issuance and verification throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rtc_token::{IssuerConfig, Role, TokenIssuer, TokenRequest, UserId};

const NOW: u32 = 1_700_000_000;

fn issuer() -> TokenIssuer {
    let config = IssuerConfig::new("0123456789abcdef0123456789abcdef", "5f4dcc3b5aa765d61d8327deb882cf99");
    TokenIssuer::from_config(&config).expect("valid app id")
}

fn bench_generate(c: &mut Criterion) {
    let issuer = issuer();
    let publisher = TokenRequest::new("consultation_abc", UserId(42), Role::Publisher).ttl_secs(3600);
    let subscriber = TokenRequest::new("consultation_abc", UserId(42), Role::Subscriber).ttl_secs(3600);

    c.bench_function("generate_token/publisher", |b| {
        b.iter(|| issuer.generate_token(black_box(&publisher), black_box(NOW)))
    });
    c.bench_function("generate_token/subscriber", |b| {
        b.iter(|| issuer.generate_token(black_box(&subscriber), black_box(NOW)))
    });
}

fn bench_verify(c: &mut Criterion) {
    let issuer = issuer();
    let request = TokenRequest::new("consultation_abc", UserId(42), Role::Publisher).ttl_secs(3600);
    let token = issuer
        .generate_token(&request, NOW)
        .expect("token issues");

    c.bench_function("verify", |b| {
        b.iter(|| issuer.verify(black_box(&token), black_box("consultation_abc"), NOW))
    });
}

criterion_group!(benches, bench_generate, bench_verify);
criterion_main!(benches);
