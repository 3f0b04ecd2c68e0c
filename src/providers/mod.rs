pub mod binance;

pub use binance::BinanceProvider;
