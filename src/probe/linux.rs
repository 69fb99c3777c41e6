// OS calls behind the probes: interface enumeration and signal delivery

use std::io;

use super::InterfaceEntry;

/// Every `getifaddrs(3)` entry, in kernel order.
#[cfg(target_os = "linux")]
pub(super) fn enumerate_interfaces() -> io::Result<Vec<InterfaceEntry>> {
    use std::ffi::CStr;

    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
    // SAFETY: on success getifaddrs stores a list head that we free below.
    if unsafe { libc::getifaddrs(&mut head) } == -1 {
        return Err(io::Error::last_os_error());
    }

    let mut entries = Vec::new();
    let mut cursor = head;
    while !cursor.is_null() {
        // SAFETY: cursor walks the list returned above, which is still alive.
        let ifa = unsafe { &*cursor };
        let link_layer = !ifa.ifa_addr.is_null()
            // SAFETY: ifa_addr checked non-null; sa_family is valid for every sockaddr.
            && i32::from(unsafe { (*ifa.ifa_addr).sa_family }) == libc::AF_PACKET;
        let name = if ifa.ifa_name.is_null() {
            String::new()
        } else {
            // SAFETY: ifa_name is a NUL-terminated string owned by the list.
            unsafe { CStr::from_ptr(ifa.ifa_name) }
                .to_string_lossy()
                .into_owned()
        };
        entries.push(InterfaceEntry {
            name,
            flags: ifa.ifa_flags,
            link_layer,
        });
        cursor = ifa.ifa_next;
    }

    // SAFETY: head came from getifaddrs and no reference into it outlives this call.
    unsafe { libc::freeifaddrs(head) };
    Ok(entries)
}

#[cfg(not(target_os = "linux"))]
pub(super) fn enumerate_interfaces() -> io::Result<Vec<InterfaceEntry>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "link-layer enumeration requires AF_PACKET",
    ))
}

/// Sends `signal` to `pid` with `kill(2)`.
pub(super) fn deliver_signal(pid: i32, signal: i32) -> io::Result<()> {
    // SAFETY: kill(2) takes plain integers and touches no memory we own.
    if unsafe { libc::kill(pid, signal) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}
