//! ID 分配器

/// 单调递增的 ID 分配器
///
/// 从 0 开始，无间隔、不复用。每个图实例持有自己的分配器。
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配下一个 ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// 下一个将被分配的 ID（不消耗），即已分配的数量
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_zero_without_gaps() {
        let mut ids = IdAllocator::new();
        let issued: Vec<u64> = (0..5).map(|_| ids.next_id()).collect();
        assert_eq!(issued, vec![0, 1, 2, 3, 4]);
        assert_eq!(ids.peek(), 5);
        assert_eq!(ids.next_id(), 5);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), 0);
        assert_eq!(a.next_id(), 2);
    }
}
