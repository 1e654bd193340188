use core_types::Kline;
use std::collections::VecDeque;

/// A bounded rolling buffer of the newest candles, oldest first.
#[derive(Debug, Clone)]
pub struct CandleHistory {
    capacity: usize,
    klines: VecDeque<Kline>,
}

impl CandleHistory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, klines: VecDeque::with_capacity(capacity) }
    }

    /// Appends a candle, evicting the oldest one once the buffer is full.
    pub fn push(&mut self, kline: Kline) {
        if self.capacity == 0 {
            return;
        }
        if self.klines.len() == self.capacity {
            self.klines.pop_front();
        }
        self.klines.push_back(kline);
    }

    /// True once the buffer holds `capacity` candles.
    pub fn is_warm(&self) -> bool {
        self.klines.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.klines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.klines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The buffered candles as one contiguous slice.
    pub fn window(&mut self) -> &[Kline] {
        self.klines.make_contiguous()
    }
}
