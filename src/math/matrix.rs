use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of buffer elements a `rows x cols` view with the given stride touches.
fn span(rows: usize, cols: usize, stride: usize) -> usize {
    if rows == 0 {
        0
    } else {
        (rows - 1) * stride + cols
    }
}

/// `rows * cols`, panicking instead of wrapping on overflow.
fn element_count(rows: usize, cols: usize) -> usize {
    match rows.checked_mul(cols) {
        Some(n) => n,
        None => panic!("{rows}x{cols} matrix overflows the addressable element count"),
    }
}

fn check_view(len: usize, rows: usize, cols: usize, stride: usize) {
    assert!(stride >= cols, "stride {stride} is smaller than column count {cols}");
    let need = span(rows, cols, stride);
    assert!(
        len >= need,
        "buffer too small for {rows}x{cols} view with stride {stride}: {len} < {need}"
    );
}

/// Owning row-major matrix. The stride of an allocated matrix is always `cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix.
    ///
    /// Running out of memory aborts the process; nothing downstream can
    /// proceed without the buffer.
    pub fn alloc(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; element_count(rows, cols)],
        }
    }

    /// Wraps an existing row-major buffer of exactly `rows * cols` values.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Matrix {
        let n = element_count(rows, cols);
        assert_eq!(data.len(), n, "expected {n} values for a {rows}x{cols} matrix");
        Matrix { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn view(&self) -> MatView<'_> {
        MatView {
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
            data: &self.data,
        }
    }

    pub fn view_mut(&mut self) -> MatViewMut<'_> {
        MatViewMut {
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
            data: &mut self.data,
        }
    }

    /// Borrows row `r` as a 1 x cols view without copying.
    pub fn row(&self, r: usize) -> MatView<'_> {
        self.view().row(r)
    }

    pub fn row_mut(&mut self, r: usize) -> MatViewMut<'_> {
        self.view_mut().into_row(r)
    }

    pub fn fill(&mut self, v: f32) {
        self.view_mut().fill(v);
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        self.view_mut().randomize(rng, low, high);
    }

    pub fn copy_from(&mut self, src: MatView<'_>) {
        self.view_mut().copy_from(src);
    }

    pub fn sum_in_place(&mut self, a: MatView<'_>) {
        self.view_mut().sum_in_place(a);
    }

    /// `self = a . b`
    pub fn dot(&mut self, a: MatView<'_>, b: MatView<'_>) {
        self.view_mut().dot(a, b);
    }

    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        self.view_mut().apply(f);
    }

    pub fn render(&self, name: &str, padding: usize) -> String {
        self.view().render(name, padding)
    }
}

impl<'a> From<&'a Matrix> for MatView<'a> {
    fn from(m: &'a Matrix) -> Self {
        m.view()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

/// Read-only strided view over a buffer it does not own.
///
/// Element `(i, j)` lives at `data[i * stride + j]`. Several views may share
/// one buffer, e.g. the input and target columns of a training table.
#[derive(Debug, Clone, Copy)]
pub struct MatView<'a> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: &'a [f32],
}

impl<'a> MatView<'a> {
    /// Panics if `stride < cols` or `data` is too short for the requested shape.
    pub fn new(data: &'a [f32], rows: usize, cols: usize, stride: usize) -> MatView<'a> {
        check_view(data.len(), rows, cols, stride);
        MatView { rows, cols, stride, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// 1 x cols view of row `r`, aliasing the same buffer.
    pub fn row(&self, r: usize) -> MatView<'a> {
        assert!(r < self.rows, "row {r} out of range for {}x{} matrix", self.rows, self.cols);
        MatView {
            rows: 1,
            cols: self.cols,
            stride: self.stride,
            data: &self.data[r * self.stride..],
        }
    }

    /// View of `count` columns starting at column `start`, keeping the stride.
    pub fn columns(&self, start: usize, count: usize) -> MatView<'a> {
        assert!(
            start + count <= self.cols,
            "columns {start}..{} out of range for {}x{} matrix",
            start + count,
            self.rows,
            self.cols
        );
        let data: &'a [f32] = if self.rows == 0 { &[] } else { &self.data[start..] };
        MatView {
            rows: self.rows,
            cols: count,
            stride: self.stride,
            data,
        }
    }

    /// Dense row-major copy of the viewed elements.
    pub fn to_vec(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.push(self[(i, j)]);
            }
        }
        out
    }

    /// Text dump of the form `name = [ ... ]`, each line indented by `padding`.
    pub fn render(&self, name: &str, padding: usize) -> String {
        let pad = " ".repeat(padding);
        let mut out = format!("{pad}{name} = [\n");
        for i in 0..self.rows {
            out.push_str(&pad);
            out.push_str("    ");
            for j in 0..self.cols {
                out.push_str(&format!("{:.6} ", self[(i, j)]));
            }
            out.push('\n');
        }
        out.push_str(&pad);
        out.push_str("]\n");
        out
    }
}

impl Index<(usize, usize)> for MatView<'_> {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}x{} view",
            self.rows,
            self.cols
        );
        &self.data[i * self.stride + j]
    }
}

impl fmt::Display for MatView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, "{:.6} ", self[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mutable strided view. All in-place matrix operations live here; `Matrix`
/// forwards to them through `view_mut()`.
#[derive(Debug)]
pub struct MatViewMut<'a> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: &'a mut [f32],
}

impl<'a> MatViewMut<'a> {
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize, stride: usize) -> MatViewMut<'a> {
        check_view(data.len(), rows, cols, stride);
        MatViewMut { rows, cols, stride, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_view(&self) -> MatView<'_> {
        MatView {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            data: &*self.data,
        }
    }

    /// Reborrows row `r` for the lifetime of `&mut self`.
    pub fn row_mut(&mut self, r: usize) -> MatViewMut<'_> {
        assert!(r < self.rows, "row {r} out of range for {}x{} matrix", self.rows, self.cols);
        MatViewMut {
            rows: 1,
            cols: self.cols,
            stride: self.stride,
            data: &mut self.data[r * self.stride..],
        }
    }

    /// Consumes the view and keeps only row `r`.
    pub fn into_row(self, r: usize) -> MatViewMut<'a> {
        let MatViewMut { rows, cols, stride, data } = self;
        assert!(r < rows, "row {r} out of range for {rows}x{cols} matrix");
        MatViewMut {
            rows: 1,
            cols,
            stride,
            data: &mut data[r * stride..],
        }
    }

    pub fn fill(&mut self, v: f32) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] = v;
            }
        }
    }

    /// Draws every element uniformly from `[low, high)`.
    ///
    /// # Panics
    /// Panics unless `low < high` and both bounds are finite.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        assert!(low < high, "empty sampling range [{low}, {high})");
        let dist = Uniform::new(low, high);
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] = dist.sample(rng);
            }
        }
    }

    pub fn copy_from(&mut self, src: MatView<'_>) {
        assert!(
            self.rows == src.rows && self.cols == src.cols,
            "copy shape mismatch: dst {}x{}, src {}x{}",
            self.rows,
            self.cols,
            src.rows,
            src.cols
        );
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] = src[(i, j)];
            }
        }
    }

    pub fn sum_in_place(&mut self, a: MatView<'_>) {
        assert!(
            self.rows == a.rows && self.cols == a.cols,
            "sum shape mismatch: dst {}x{}, operand {}x{}",
            self.rows,
            self.cols,
            a.rows,
            a.cols
        );
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] += a[(i, j)];
            }
        }
    }

    /// Overwrites `self` with the product `a . b`. Prior contents are ignored.
    pub fn dot(&mut self, a: MatView<'_>, b: MatView<'_>) {
        assert!(
            a.cols == b.rows && self.rows == a.rows && self.cols == b.cols,
            "product shape mismatch: dst {}x{}, a {}x{}, b {}x{}",
            self.rows,
            self.cols,
            a.rows,
            a.cols,
            b.rows,
            b.cols
        );
        let n = a.cols;
        for i in 0..self.rows {
            for j in 0..self.cols {
                let mut acc = 0.0;
                for k in 0..n {
                    acc += a[(i, k)] * b[(k, j)];
                }
                self[(i, j)] = acc;
            }
        }
    }

    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] = f(self[(i, j)]);
            }
        }
    }
}

impl Index<(usize, usize)> for MatViewMut<'_> {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}x{} view",
            self.rows,
            self.cols
        );
        &self.data[i * self.stride + j]
    }
}

impl IndexMut<(usize, usize)> for MatViewMut<'_> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}x{} view",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.stride + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn alloc_elements_are_independent() {
        let mut a = Matrix::alloc(3, 4);
        let b = Matrix::alloc(3, 4);
        assert_eq!(a.as_slice().len(), 12);
        for i in 0..3 {
            for j in 0..4 {
                a[(i, j)] = (i * 4 + j) as f32;
            }
        }
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(a[(i, j)], (i * 4 + j) as f32);
                assert_eq!(b[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn row_view_aliases_parent() {
        let mut m = Matrix::alloc(3, 2);
        m.fill(7.0);
        assert_eq!(m.row(1).to_vec(), vec![7.0, 7.0]);

        m.row_mut(1).fill(-1.0);
        assert_eq!(m.as_slice(), &[7.0, 7.0, -1.0, -1.0, 7.0, 7.0]);

        m[(2, 0)] = 3.0;
        assert_eq!(m.row(2)[(0, 0)], 3.0);
    }

    #[test]
    fn strided_views_share_one_buffer() {
        let table: [f32; 12] = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0];
        let all = MatView::new(&table, 4, 3, 3);
        let inputs = all.columns(0, 2);
        let targets = all.columns(2, 1);
        assert_eq!(inputs.row(2).to_vec(), vec![1.0, 0.0]);
        assert_eq!(targets.to_vec(), vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(targets.stride(), 3);
    }

    #[test]
    fn dot_of_ones_is_hand_computed_sum() {
        let mut a = Matrix::alloc(1, 2);
        let mut b = Matrix::alloc(2, 1);
        a.fill(1.0);
        b.fill(1.0);
        let mut dst = Matrix::alloc(1, 1);
        dst.fill(100.0);
        dst.dot(a.view(), b.view());
        assert_eq!(dst[(0, 0)], 2.0);
    }

    #[test]
    fn dot_general_shapes() {
        let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let mut c = Matrix::alloc(2, 2);
        c.dot(a.view(), b.view());
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn sum_copy_and_apply() {
        let mut a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_vec(2, 2, vec![0.5, 0.5, 0.5, 0.5]);
        a.sum_in_place(b.view());
        assert_eq!(a.as_slice(), &[1.5, 2.5, 3.5, 4.5]);
        a.apply(|x| x * 2.0);
        assert_eq!(a.as_slice(), &[3.0, 5.0, 7.0, 9.0]);
        let mut c = Matrix::alloc(2, 2);
        c.copy_from(a.view());
        assert_eq!(c, a);
    }

    #[test]
    fn randomize_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut m = Matrix::alloc(8, 8);
        m.randomize(&mut rng, -0.5, 0.25);
        assert!(m.as_slice().iter().all(|&x| (-0.5..0.25).contains(&x)));
    }

    #[test]
    fn randomize_never_reaches_upper_bound_on_narrow_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let high = 1.000_000_1_f32;
        let mut m = Matrix::alloc(200, 200);
        m.randomize(&mut rng, 1.0, high);
        assert!(m.as_slice().iter().all(|&x| (1.0..high).contains(&x)));
    }

    #[test]
    #[should_panic(expected = "empty sampling range")]
    fn randomize_rejects_empty_range() {
        let mut rng = StdRng::seed_from_u64(9);
        Matrix::alloc(1, 1).randomize(&mut rng, 0.5, 0.5);
    }

    #[test]
    fn strided_mut_view_writes_rows_through_to_parent() {
        let mut buf = [0.0f32; 7];
        {
            let mut m = MatViewMut::new(&mut buf, 2, 3, 4);
            assert_eq!((m.rows(), m.cols(), m.stride()), (2, 3, 4));
            m.row_mut(1).fill(5.0);
            m.row_mut(0)[(0, 2)] = 2.0;
            assert_eq!(m.as_view().row(1).to_vec(), vec![5.0, 5.0, 5.0]);
            assert_eq!(m.as_view().to_vec(), vec![0.0, 0.0, 2.0, 5.0, 5.0, 5.0]);
        }
        // Column 3 of row 0 is stride padding and must stay untouched.
        assert_eq!(buf, [0.0, 0.0, 2.0, 0.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "buffer too small")]
    fn short_mut_buffer_is_rejected() {
        let mut buf = [0.0f32; 6];
        let _ = MatViewMut::new(&mut buf, 2, 3, 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn mut_view_row_out_of_range_panics() {
        let mut buf = [0.0f32; 7];
        let mut m = MatViewMut::new(&mut buf, 2, 3, 4);
        let _ = m.row_mut(2);
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn alloc_overflow_panics() {
        let _ = Matrix::alloc(usize::MAX, 2);
    }

    #[test]
    fn render_names_and_pads() {
        let m = Matrix::from_vec(1, 2, vec![1.0, 0.5]);
        assert_eq!(m.render("w", 2), "  w = [\n      1.000000 0.500000 \n  ]\n");
    }

    #[test]
    #[should_panic(expected = "copy shape mismatch")]
    fn copy_shape_mismatch_panics() {
        let mut a = Matrix::alloc(1, 3);
        let b = Matrix::alloc(1, 2);
        a.copy_from(b.view());
    }

    #[test]
    #[should_panic(expected = "product shape mismatch")]
    fn dot_shape_mismatch_panics() {
        let mut dst = Matrix::alloc(1, 1);
        let a = Matrix::alloc(1, 2);
        let b = Matrix::alloc(3, 1);
        dst.dot(a.view(), b.view());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn row_out_of_range_panics() {
        let m = Matrix::alloc(2, 2);
        let _ = m.row(2);
    }

    #[test]
    #[should_panic(expected = "buffer too small")]
    fn short_buffer_is_rejected() {
        let data = [0.0f32; 5];
        let _ = MatView::new(&data, 2, 3, 3);
    }
}
