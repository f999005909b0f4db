//! Growable GPU buffer for the per-frame uniform arena.
//!
//! Grows 2x when a frame's data exceeds capacity. Never shrinks (GPU
//! buffers cannot be resized in place), so after the first few frames the
//! per-object uniforms are a single `write_buffer` with no allocation.

/// A GPU buffer that can grow dynamically.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // Capacity in bytes
    len: usize,      // Current data length in bytes
    usage: wgpu::BufferUsages,
    label: String,
}

/// Capacity to reallocate to when `needed` bytes do not fit in `capacity`.
fn grown_capacity(needed: usize, capacity: usize) -> usize {
    // 2x growth, minimum 1KB
    (needed * 2).max(capacity + 1024)
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(256);
        let buffer = Self::allocate(device, label, capacity, usage);
        Self {
            buffer,
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write raw bytes to buffer, growing if necessary.
    ///
    /// Returns `true` if buffer was reallocated (bind groups need recreation).
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let needed = data.len();

        let reallocated = if needed > self.capacity {
            let new_capacity = grown_capacity(needed, self.capacity);
            log::debug!(
                "Growing {} from {} to {new_capacity} bytes",
                self.label,
                self.capacity
            );
            self.buffer =
                Self::allocate(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = needed;

        reallocated
    }

    /// The current GPU buffer. Replaced on reallocation.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last [`Self::write_bytes`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::grown_capacity;

    #[test]
    fn growth_doubles_large_requests() {
        assert_eq!(grown_capacity(4096, 1024), 8192);
    }

    #[test]
    fn growth_adds_at_least_a_kilobyte() {
        assert_eq!(grown_capacity(300, 256), 1280);
    }
}
