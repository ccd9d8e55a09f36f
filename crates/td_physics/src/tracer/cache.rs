// crates/td_physics/src/tracer/cache.rs

//! 梯度缓存
//!
//! 按 (示踪剂, 界面) 存储最近一次计算的三分量梯度。
//! 构造时按全网格最大行长一次分配，之后跨调用复用；
//! 请求超出容量时扩容，从不缩小。
//!
//! 每个工作线程持有自己的缓存实例，以 `&mut` 传入计算核心。

use td_foundation::Axis;

/// 单个界面的梯度 (∂C/∂l1, ∂C/∂l2, ∂C/∂l3)
pub type FaceGradient = [f64; 3];

/// 梯度缓存 (示踪剂 × 界面 × 3)
#[derive(Debug, Clone)]
pub struct GradientCache {
    /// 示踪剂数量
    n_tracer: usize,
    /// 每种示踪剂的界面容量
    capacity: usize,
    /// 按示踪剂分块的梯度数据
    data: Vec<FaceGradient>,
    /// 每种示踪剂最近一次写入的闭区间 [beg, end]
    written: Vec<Option<(usize, usize)>>,
}

impl GradientCache {
    /// 按最大行长创建缓存
    pub fn new(n_tracer: usize, max_row_len: usize) -> Self {
        Self {
            n_tracer,
            capacity: max_row_len,
            data: vec![[0.0; 3]; n_tracer * max_row_len],
            written: vec![None; n_tracer],
        }
    }

    /// 示踪剂数量
    #[inline]
    pub fn n_tracer(&self) -> usize {
        self.n_tracer
    }

    /// 每种示踪剂的界面容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 确保容量不少于 `len`
    ///
    /// 扩容会使已有内容失效。
    pub fn ensure_capacity(&mut self, len: usize) {
        if len <= self.capacity {
            return;
        }
        log::debug!(
            "梯度缓存扩容: {} -> {} 个界面 ({} 种示踪剂)",
            self.capacity,
            len,
            self.n_tracer
        );
        self.capacity = len;
        self.data = vec![[0.0; 3]; self.n_tracer * len];
        self.written.fill(None);
    }

    /// 开始写入某示踪剂，返回可写切片（长度为容量）
    ///
    /// 之前的写入窗口作废，直到 [`Self::commit`] 登记新窗口。
    pub(crate) fn begin_write(&mut self, species: usize, end: usize) -> &mut [FaceGradient] {
        assert!(
            species < self.n_tracer,
            "示踪剂索引 {} 超出缓存容量 {}",
            species,
            self.n_tracer
        );
        self.ensure_capacity(end + 1);
        self.written[species] = None;
        let start = species * self.capacity;
        &mut self.data[start..start + self.capacity]
    }

    /// 登记某示踪剂的有效窗口
    pub(crate) fn commit(&mut self, species: usize, beg: usize, end: usize) {
        self.written[species] = Some((beg, end));
    }

    /// 某示踪剂最近写入的窗口
    #[inline]
    pub fn written_range(&self, species: usize) -> Option<(usize, usize)> {
        self.written.get(species).copied().flatten()
    }

    /// 读取界面梯度；窗口外返回 `None`
    #[inline]
    pub fn get(&self, species: usize, n: usize) -> Option<FaceGradient> {
        match self.written_range(species) {
            Some((beg, end)) if (beg..=end).contains(&n) => {
                Some(self.data[species * self.capacity + n])
            }
            _ => None,
        }
    }

    /// 读取界面梯度的单个分量；窗口外返回 `None`
    #[inline]
    pub fn component(&self, species: usize, n: usize, axis: Axis) -> Option<f64> {
        self.get(species, n).map(|g| g[axis.index()])
    }

    /// 某示踪剂已写入窗口的切片（窗口内下标从 0 开始）
    pub fn window(&self, species: usize) -> Option<&[FaceGradient]> {
        let (beg, end) = self.written_range(species)?;
        let start = species * self.capacity;
        Some(&self.data[start + beg..=start + end])
    }
}
